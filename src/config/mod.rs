//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::fetch::FetcherConfig;
use crate::models::{Field, TableKind};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// HTTP fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("rink-stats/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            ..FetcherConfig::default()
        }
    }
}

/// Defaults for the table view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewDefaults {
    /// Season shown when none is given
    #[serde(default)]
    pub season: Option<u16>,

    #[serde(default)]
    pub table: TableKind,

    /// Initial sort column; the table's own default when unset
    #[serde(default)]
    pub sort: Option<String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// HTTP root to fetch datasets from instead of `data_dir`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub view: ViewDefaults,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: None,
            log_level: default_log_level(),
            fetch: FetchConfig::default(),
            view: ViewDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Fetch timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url).map_err(|e| {
                ConfigError::ValidationError(format!("Invalid base_url {}: {}", base_url, e))
            })?;
        }

        if let Some(sort) = &self.view.sort {
            sort.parse::<Field>()
                .map_err(|e| ConfigError::ValidationError(format!("Invalid view.sort: {}", e)))?;
        }

        Ok(())
    }
}
