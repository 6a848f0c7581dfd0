//! Logger Module
//!
//! Console logging based on `tracing-subscriber` for applications embedding
//! the notification clients:
//! - Env-filter style level directives
//! - Full, Compact and JSON output formats
//! - Color control, with ANSI output only on a terminal

pub mod config;


// Re-export main types
pub use config::*;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger with the given configuration
///
/// Fails when the configuration is invalid or a global subscriber has
/// already been installed.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = config.env_filter()?;
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    match config.format {
        LogFormat::Full => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).json())
            .try_init()?,
    }

    Ok(())
}
