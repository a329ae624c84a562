//! Engine configuration
//!
//! Stored as JSON under the platform config directory; a missing file means
//! defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::SortSpec;
use crate::store::file::default_data_dir;
use crate::store::DEFAULT_NAMESPACE;

/// Persisted engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory for presets and history; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub namespace: String,
    pub default_sort: SortSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_sort: SortSpec::default(),
        }
    }
}

impl Config {
    /// Data directory after applying a command-line or environment override
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Option<PathBuf> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(default_data_dir)
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("task-search").join("config.json"))
}

/// Load the configuration from disk
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    // If file doesn't exist, return default config
    if !path.exists() {
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path).context("Failed to read config file")?;
    let config: Config = serde_json::from_str(&data).context("Failed to parse config file")?;
    Ok(config)
}

/// Save the configuration to disk
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, data).context("Failed to write config file")?;
    Ok(())
}
