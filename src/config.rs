use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::constants::{DEFAULT_API_KEY_ENV, DEFAULT_RIOT_API_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::common::error::{IngestError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub riot: RiotApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiotApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// File holding the API key, e.g. a mounted secret
    #[serde(default)]
    pub api_key_file: Option<String>,
    /// Environment variable consulted before `api_key_file`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_base_url() -> String {
    DEFAULT_RIOT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for RiotApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            api_key_file: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            IngestError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

impl RiotApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolve the API key from the configured environment variable, then the key file
    pub fn resolve_api_key(&self) -> Result<String> {
        dotenv::dotenv().ok();
        if let Ok(key) = std::env::var(&self.api_key_env) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }
        match &self.api_key_file {
            Some(path) => {
                let key = fs::read_to_string(path).map_err(|e| {
                    IngestError::Config(format!("Failed to read API key file '{}': {}", path, e))
                })?;
                Ok(key.trim().to_string())
            }
            None => Err(IngestError::Config(format!(
                "No API key: set {} or riot.api_key_file",
                self.api_key_env
            ))),
        }
    }
}
