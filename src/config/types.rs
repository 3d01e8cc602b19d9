//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_prompt, default_server_name};
use super::limits::LimitsConfig;
use super::listen::ListenConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server behavior.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Per-connection limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in log output.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Line sent to a new connection asking for its nickname.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Also announce "<nick> left the chat!" when a client drops without `/quit`.
    #[serde(default)]
    pub announce_dropped: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            prompt: default_prompt(),
            announce_dropped: false,
        }
    }
}
