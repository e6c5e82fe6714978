use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/todosync/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("todosync").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The store URL is http(s)
    /// - The items path is not empty
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let store = &self.store;

        if !(store.base_url.starts_with("http://") || store.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Store base_url '{}' must start with http:// or https://",
                    store.base_url
                ),
            });
        }

        if store.items_path.trim_matches('/').is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Store items_path must not be empty".to_string(),
            });
        }

        if store.connect_timeout_seconds == 0 || store.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Store timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
