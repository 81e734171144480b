use serde::{Deserialize, Serialize};

/// Settings of the machine learning subsystem.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MlConfig {
    pub disable: bool,
}

/// Configuration values the search form depends on.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FormConfig {
    pub ml: MlConfig,
}

/// Decides whether the query suggestion buttons are shown.
///
/// An explicit flag always wins. Without one, suggestions are shown whenever
/// the machine learning subsystem is not disabled.
pub fn should_show(explicit: Option<bool>, ml_disabled: bool) -> bool {
    explicit.unwrap_or(!ml_disabled)
}
