//! Configuration loader for message-sender
//!
//! This module provides the `ConfigLoader` struct that reads channel
//! definitions from an optional TOML file and environment variables.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "MESSAGE_SENDER_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "MESSAGE_SENDER";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources, in order of priority:
/// 1. The TOML file, when one is configured
/// 2. `MESSAGE_SENDER_*` environment variables (highest priority)
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_file: Option<PathBuf>,
    /// Prefix for environment overrides
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Picks up `MESSAGE_SENDER_CONFIG_FILE` when it is set.
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Load from this file instead of `MESSAGE_SENDER_CONFIG_FILE`
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Get the configuration file path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configured file does not exist
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        tracing::debug!(
            channels = settings.channels.len(),
            file = ?self.config_file,
            "Configuration loaded"
        );

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref path) => Self::add_file_source(builder, path)?,
            None => builder,
        };

        // MESSAGE_SENDER_CHANNELS__OPS__WEBHOOK_URL -> channels.ops.webhook_url
        let builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
