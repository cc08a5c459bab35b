//! Console configuration parsing.

use serde::Deserialize;
use std::path::Path;

use crate::activity::RECENT_LIMIT;
use crate::listing::PAGE_SIZE;

/// Console configuration loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Storage-service settings.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Console display settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Storage-service location.
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the storage service.
    #[serde(default = "default_url")]
    pub url: String,
}

/// Display tuning.
#[derive(Debug, Deserialize)]
pub struct ConsoleConfig {
    /// Rows per key-listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Capacity of the recent-activity log.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

fn default_recent_limit() -> usize {
    RECENT_LIMIT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[service]
url = "http://10.0.0.7:5000/"

[console]
page_size = 25
recent_limit = 10
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.service.url, "http://10.0.0.7:5000/");
        assert_eq!(config.console.page_size, 25);
        assert_eq!(config.console.recent_limit, 10);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.service.url, "http://127.0.0.1:5000");
        assert_eq!(config.console.page_size, PAGE_SIZE);
        assert_eq!(config.console.recent_limit, RECENT_LIMIT);
    }
}
