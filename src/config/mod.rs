//! Configuration management module for message-sender
//!
//! Clients take their configuration at construction time; this module is an
//! optional layer for applications that describe channels in a file.
//!
//! # Configuration Priority (lowest to highest)
//! 1. TOML file (`ConfigLoader::with_file` or `MESSAGE_SENDER_CONFIG_FILE`)
//! 2. `MESSAGE_SENDER_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, Settings};
