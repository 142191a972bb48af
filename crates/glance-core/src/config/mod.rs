//! Configuration management for Glance.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section is optional in the file.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Glance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote model settings
    pub inference: InferenceConfig,

    /// Upload limits
    pub limits: LimitsConfig,

    /// Credential lookup settings
    pub credentials: CredentialsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/rs.glance.glance/config.toml
    /// - Linux: ~/.config/glance/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\glance\config\config.toml
    ///
    /// Falls back to ~/.glance/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "glance", "glance")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".glance").join("config.toml")
            })
    }

    /// Resolved secrets file path (with ~ expansion).
    ///
    /// Lives next to the config file unless overridden.
    pub fn secrets_path(&self) -> PathBuf {
        match &self.credentials.secrets_file {
            Some(path) => {
                let path_str = path.to_string_lossy();
                PathBuf::from(shellexpand::tilde(&path_str).into_owned())
            }
            None => {
                let config_path = Self::default_path();
                config_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join("secrets.toml")
            }
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
