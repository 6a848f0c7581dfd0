//! Errors raised while loading channel and logger settings

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly configured settings file does not exist
    #[error("Settings file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The merged sources do not deserialize into `Settings`
    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    /// A field is present but unusable, e.g. an empty webhook URL
    #[error("Invalid setting {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Reading the file or environment failed
    #[error("Failed to read settings: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// `field` is the dotted key, e.g. `channels.ops.webhook_url`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
