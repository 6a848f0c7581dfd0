//! Configuration validation logic
//!
//! Channels only get presence checks: the clients themselves accept any
//! value. Logger settings are checked with the logger's own rules.

use crate::config::error::ConfigError;
use crate::config::settings::{LoggerSettings, Settings};
use crate::notifications::ChannelConfig;

fn require(field: String, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(field, "must not be empty"));
    }
    Ok(())
}

impl LoggerSettings {
    /// Validate logger configuration with the same rules `init_logger` applies
    ///
    /// # Validation Rules
    /// - Format must be one of: full, compact, json
    /// - Level must be a bare level (trace, debug, info, warn, error) or an
    ///   env-filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_logger_config()?
            .validate()
            .map_err(|e| ConfigError::validation("logger.level", format!("{e:#}")))
    }
}

impl ChannelConfig {
    /// Validate a channel definition named `name`
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let field = |key: &str| format!("channels.{name}.{key}");

        match self {
            ChannelConfig::Discord(c) | ChannelConfig::GoogleChat(c) => {
                require(field("webhook_url"), &c.webhook_url)
            }
            ChannelConfig::Smtp(c) => {
                require(field("server"), &c.server)?;
                require(field("from_address"), &c.from_address)?;
                require(field("username"), &c.username)?;
                if c.port == 0 {
                    return Err(ConfigError::validation(
                        field("port"),
                        "Port must be between 1 and 65535",
                    ));
                }
                Ok(())
            }
            ChannelConfig::Proton(c) => {
                require(field("email_address"), &c.email_address)?;
                require(field("smtp_token"), &c.smtp_token)
            }
        }
    }
}

impl Settings {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        for (name, channel) in &self.channels {
            channel.validate(name)?;
        }
        Ok(())
    }
}
