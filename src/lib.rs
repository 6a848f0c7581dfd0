//! Message-Sender Library
//!
//! Blocking and async clients that deliver notification messages to Discord
//! webhooks, Google Chat webhooks and SMTP servers, with a Proton Mail preset.
//!
//! ```no_run
//! use message_sender::{DiscordClient, SmtpClient};
//!
//! # fn main() -> Result<(), message_sender::DeliveryError> {
//! let discord = DiscordClient::new("https://discord.com/api/webhooks/1/token");
//! discord.send_message("Deploy finished")?;
//!
//! // Port 465 uses implicit TLS, any other port upgrades with STARTTLS
//! let smtp = SmtpClient::new("smtp.server.com", 587, "sender@email.com", "user", "password");
//! smtp.send_email("Deploy finished", "ops@email.com", "Deploy", None)?;
//! # Ok(())
//! # }
//! ```
//!
//! Every client releases its resources when dropped; `close` does the same
//! explicitly and any later send fails with [`DeliveryError::Closed`].

pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod notifications;

pub use error::{DeliveryError, DeliveryResult};
pub use notifications::email::{
    AsyncProtonEmailClient, AsyncSmtpClient, ProtonEmailClient, SmtpClient, SmtpSettings, TlsMode,
};
pub use notifications::webhook::{
    AsyncDiscordClient, AsyncGoogleChatClient, DiscordClient, GoogleChatClient,
};
pub use notifications::{
    AsyncNotifier, AsyncNotifierSet, ChannelConfig, NotificationMessage, Notifier, NotifierSet,
};
