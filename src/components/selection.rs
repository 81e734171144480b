use serde::{Deserialize, Serialize};

/// A selectable data source, identified by its unique name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Corpus {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Toggles the corpus at position `index` in the given selection.
///
/// If the name of the corpus is already selected, the result contains all
/// other selected names in their original order. Otherwise the name is
/// appended at the end. The selection itself is never changed, callers are
/// supposed to hand the returned list to the change request of their binding.
///
/// # Panics
///
/// Panics if `index` is not a valid position in `corpora`.
pub fn toggle(index: usize, corpora: &[Corpus], selected: &[String]) -> Vec<String> {
    let toggled = &corpora[index].name;
    let remove = selected.contains(toggled);

    let mut result = Vec::with_capacity(selected.len() + 1);
    for name in selected {
        if !(remove && name == toggled) {
            result.push(name.clone());
        }
    }
    if !remove {
        result.push(toggled.clone());
    }
    result
}

/// Selection from a list of names, e.g. taken from a link.
///
/// Names of unknown corpora and repeated names are dropped, the order of the
/// first occurrences is kept.
pub fn restore<'a, I>(names: I, corpora: &[Corpus]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result: Vec<String> = Vec::new();
    for name in names {
        if corpora.iter().any(|c| c.name == name) && !result.iter().any(|n| n == name) {
            result.push(name.to_string());
        }
    }
    result
}
