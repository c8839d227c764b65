use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoaderError, Result};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the SQLite reporting database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("blueeconomics.db"),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, or from `config.toml` in
    /// the working directory. An explicitly named file must exist; the
    /// default file is optional and its absence yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !config_path.is_file() {
            if required {
                return Err(LoaderError::Config(format!(
                    "config file '{}' not found",
                    config_path.display()
                )));
            }
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            LoaderError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
