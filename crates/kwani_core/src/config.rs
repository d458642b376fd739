//! Backend connection settings.
//!
//! # Responsibility
//! - Hold the base URL, API version and timeout used by the HTTP source.
//! - Resolve overrides from the process environment.
//!
//! # Invariants
//! - `base_url` is an absolute `http`/`https` URL without trailing slash.
//! - `timeout` is never zero.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://kwani2.azurewebsites.net";
pub const DEFAULT_API_VERSION: &str = "2.0.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BACKEND_URL_ENV: &str = "KWANI_BACKEND_URL";
pub const TIMEOUT_SECS_ENV: &str = "KWANI_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    InvalidTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "backend url must start with http:// or https://, got `{value}`")
            }
            Self::InvalidTimeout(value) => {
                write!(f, "timeout must be a positive number of seconds, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the remote table backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Resolves configuration from `KWANI_BACKEND_URL` / `KWANI_TIMEOUT_SECS`.
    ///
    /// Blank or unset variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = non_blank(lookup(BACKEND_URL_ENV)) {
            config = config.with_base_url(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(TIMEOUT_SECS_ENV)) {
            config.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }

    /// Returns a copy pointing at `base_url` after validation.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn normalize_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidBaseUrl(value.trim().to_string())),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}
