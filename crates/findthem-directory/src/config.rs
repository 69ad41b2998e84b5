//! Directory configuration loading from file and environment variables.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Report directory settings.
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timeouts, listing size and client identity for the report directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryConfig {
    /// Deadline for read queries, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Deadline for signing plus submission, in milliseconds.
    #[serde(default = "default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,

    /// Number of reports requested when the caller does not choose.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Value written into the client tag of published events.
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "findthem_relay=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_publish_timeout_ms() -> u64 {
    5000
}

fn default_limit() -> usize {
    20
}

fn default_client_name() -> String {
    findthem_types::DEFAULT_CLIENT_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DirectoryConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            publish_timeout_ms: default_publish_timeout_ms(),
            default_limit: default_limit(),
            client_name: default_client_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `FINDTHEM_QUERY_TIMEOUT_MS` overrides `directory.query_timeout_ms`
/// - `FINDTHEM_PUBLISH_TIMEOUT_MS` overrides `directory.publish_timeout_ms`
/// - `FINDTHEM_DEFAULT_LIMIT` overrides `directory.default_limit`
/// - `FINDTHEM_CLIENT_NAME` overrides `directory.client_name`
/// - `FINDTHEM_LOG_LEVEL` overrides `logging.level`
/// - `FINDTHEM_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides looked up by variable name. Unparsable numbers are
/// ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ms) = lookup("FINDTHEM_QUERY_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        config.directory.query_timeout_ms = ms;
    }
    if let Some(ms) = lookup("FINDTHEM_PUBLISH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        config.directory.publish_timeout_ms = ms;
    }
    if let Some(limit) = lookup("FINDTHEM_DEFAULT_LIMIT").and_then(|v| v.parse().ok()) {
        config.directory.default_limit = limit;
    }
    if let Some(name) = lookup("FINDTHEM_CLIENT_NAME") {
        config.directory.client_name = name;
    }
    if let Some(level) = lookup("FINDTHEM_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("FINDTHEM_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
