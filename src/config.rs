//! Configuration management for Rosterbot
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file with environment variable overrides.

use crate::error::{Result, RosterbotError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Rosterbot
///
/// Holds the account-linking settings and the display limits applied when
/// formatting replies.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Account linking configuration
    #[serde(default)]
    pub link: LinkConfig,

    /// Reply formatting limits
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Account linking configuration
///
/// The bot itself never performs the OAuth exchange; it only hands the user
/// a login URL built from this base plus a one-time link code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Base URL of the auth service that completes the account link
    #[serde(default = "default_link_base_url")]
    pub base_url: String,

    /// Minutes before an unused link code expires
    #[serde(default = "default_link_code_ttl")]
    pub code_ttl_minutes: i64,
}

fn default_link_base_url() -> String {
    "https://rosterbot.example.com".to_string()
}

fn default_link_code_ttl() -> i64 {
    10
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_link_base_url(),
            code_ttl_minutes: default_link_code_ttl(),
        }
    }
}

/// Reply formatting limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum number of free agents shown by `show available`
    #[serde(default = "default_available_limit")]
    pub available_limit: usize,
}

fn default_available_limit() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            available_limit: default_available_limit(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RosterbotError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RosterbotError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("ROSTERBOT_LINK_BASE_URL") {
            self.link.base_url = base_url;
        }

        if let Ok(limit) = std::env::var("ROSTERBOT_AVAILABLE_LIMIT") {
            if let Ok(value) = limit.parse() {
                self.display.available_limit = value;
            } else {
                tracing::warn!("Invalid ROSTERBOT_AVAILABLE_LIMIT: {}", limit);
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `RosterbotError::Config` if any value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.link.base_url.trim().is_empty() {
            return Err(RosterbotError::Config("link.base_url must not be empty".to_string()).into());
        }

        if self.link.code_ttl_minutes <= 0 {
            return Err(
                RosterbotError::Config("link.code_ttl_minutes must be positive".to_string()).into(),
            );
        }

        if self.display.available_limit == 0 {
            return Err(RosterbotError::Config(
                "display.available_limit must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.available_limit, 10);
        assert_eq!(config.link.code_ttl_minutes, 10);
    }

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let yaml = "link:\n  base_url: https://bot.example.org\n";
        let config: Config = serde_yaml::from_str(yaml).expect("should parse");
        assert_eq!(config.link.base_url, "https://bot.example.org");
        assert_eq!(config.link.code_ttl_minutes, 10);
        assert_eq!(config.display.available_limit, 10);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.link.base_url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_available_limit() {
        let mut config = Config::default();
        config.display.available_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("available_limit"));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = Config::load("/definitely/not/here.yaml").expect("should default");
        assert_eq!(config.display.available_limit, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "display:\n  available_limit: 5\n").expect("write");
        let config = Config::load(path.to_str().unwrap()).expect("load");
        assert_eq!(config.display.available_limit, 5);
    }
}
