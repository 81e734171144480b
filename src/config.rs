use crate::components::suggestions::{FormConfig, MlConfig};
use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliConfig {
    /// Port to listen to.
    #[arg(long, short, default_value_t = 3000)]
    pub port: u16,
    /// Externally used URL for the start page of the frontend.
    #[arg(long, default_value = "http://127.0.0.1:3000/")]
    pub frontend_prefix: String,
    /// URL for the graphANNIS service used by the frontend.
    #[arg(long, default_value = "http://127.0.0.1:5711/v1/")]
    pub service_url: String,
    /// If set, the SQLite database file to store sessions in.
    #[arg(long)]
    pub session_file: Option<PathBuf>,
    /// Disable the machine learning based features, like query suggestions.
    #[arg(long, env = "ANNIS_DISABLE_ML")]
    pub disable_ml: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        let empty_arguments: Vec<OsString> = Vec::default();
        Parser::parse_from(empty_arguments)
    }
}

impl CliConfig {
    pub fn form_config(&self) -> FormConfig {
        FormConfig {
            ml: MlConfig {
                disable: self.disable_ml,
            },
        }
    }
}
