//! Configuration management for seclearn.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "seclearn";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "seclearn.db";

/// Environment variable prefix. Nested keys are separated by `__`, so
/// `SECLEARN_STORAGE__KEY_PREFIX` sets `storage.key_prefix`.
const ENV_PREFIX: &str = "SECLEARN_";

/// Characters allowed in a storage key prefix.
const KEY_PREFIX_PATTERN: &str = r"^[A-Za-z0-9_.\-]*$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SECLEARN_`)
/// 2. TOML config file at `~/.config/seclearn/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Dashboard behaviour.
    pub ui: UiConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/seclearn/seclearn.db`
    pub database_path: Option<PathBuf>,
    /// Prefix of every persisted key.
    pub key_prefix: String,
}

/// Dashboard-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period before a typed search is applied, in milliseconds.
    pub search_debounce_ms: u64,
    /// Number of tags shown in the sidebar tag cloud.
    pub tag_cloud_size: usize,
    /// Where `render` writes the page when no `--output` is given.
    /// Defaults to standard output.
    pub output_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key_prefix: "sl_".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 220,
            tag_cloud_size: 12,
            output_path: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `SECLEARN_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let pattern = regex::Regex::new(KEY_PREFIX_PATTERN)
            .map_err(|e| Error::internal(format!("bad key prefix pattern: {e}")))?;
        if !pattern.is_match(&self.storage.key_prefix) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "key_prefix {:?} may only contain letters, digits, '_', '-' and '.'",
                    self.storage.key_prefix
                ),
            });
        }

        if self.ui.search_debounce_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "search_debounce_ms must be greater than 0".to_string(),
            });
        }

        if self.ui.tag_cloud_size == 0 {
            return Err(Error::ConfigValidation {
                message: "tag_cloud_size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the search debounce delay as a Duration.
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.ui.search_debounce_ms)
    }
}
