use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{MemoError, Result};

/// Run configuration, read from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Abbreviation used in id construction and the object.csv project column
    #[serde(default = "default_abbreviation")]
    pub abbreviation: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            abbreviation: default_abbreviation(),
        }
    }
}

/// Where the persons and events sheets come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// Public Google-Sheet CSV export
    Sheet {
        sheet_id: String,
        persons_sheet: String,
        events_sheet: String,
    },
    /// Local CSV files
    Csv {
        persons_path: PathBuf,
        events_path: PathBuf,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Destination directory; one folder per digital object is created below it
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
        }
    }
}

fn default_abbreviation() -> String {
    constants::PROJECT_ABBR.to_string()
}

fn default_delimiter() -> char {
    ';'
}

fn default_output_root() -> PathBuf {
    PathBuf::from("output")
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            MemoError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
