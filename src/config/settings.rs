//! Configuration settings structures for message-sender
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};
use crate::notifications::ChannelConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Settings
// ============================================================================

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logger: LoggerSettings,
    /// Named notification channels
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfig>,
}

/// Logger configuration as it appears in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Filter directive, e.g. `info` or `message_sender=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of `full`, `compact`, `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert to the logger's runtime configuration
    ///
    /// Fails on an unknown format name; the level is checked by
    /// [`LoggerConfig::validate`].
    pub fn to_logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.format", e.to_string()))?;

        Ok(LoggerConfig {
            level: self.level.clone(),
            format,
            colored: self.colored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.channels.is_empty());
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.logger.format, "full");
        assert!(settings.logger.colored);
    }

    #[test]
    fn test_logger_settings_conversion() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            format: "JSON".to_string(),
            colored: false,
        };
        let config = settings.to_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.colored);
    }

    #[test]
    fn test_unknown_format_is_not_defaulted() {
        let settings = LoggerSettings {
            format: "xml".to_string(),
            ..LoggerSettings::default()
        };
        assert!(matches!(
            settings.to_logger_config(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "logger.format"
        ));
    }
}
