//! Application configuration management
//!
//! Configuration for the demo binary is read from environment variables
//! (after loading a `.env` file if one exists) and validated up front.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_LOG_FORMAT, DEFAULT_RUST_LOG, ENV_LOG_FORMAT, ENV_RULE_FILE, ENV_RUST_LOG,
};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fallback tracing filter when `RUST_LOG` cannot be parsed by the subscriber
    pub rust_log: String,
    pub log_format: LogFormat,
    /// JSON rule file to run against the catalogue, if any
    pub rule_file: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue(ENV_LOG_FORMAT.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = lookup(ENV_LOG_FORMAT)
            .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string())
            .parse()?;

        let rule_file = match lookup(ENV_RULE_FILE) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(ENV_RULE_FILE.to_string()));
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        Ok(Self {
            rust_log: lookup(ENV_RUST_LOG).unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
            log_format,
            rule_file,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
