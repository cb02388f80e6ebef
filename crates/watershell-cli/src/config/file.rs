use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use watershell::engine::config::{ShellMode, ShellSizePolicy};

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSelectionConfig {
    pub oxygen_name: Option<String>,
    pub water_residues: Option<Vec<String>>,
}

/// Optional settings read from a TOML configuration file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<ShellMode>,
    pub short_shells: Option<ShellSizePolicy>,
    pub selection: Option<FileSelectionConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
