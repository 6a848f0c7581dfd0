//! Builds notifiers from channel configuration.

use super::channels::ChannelConfig;
use super::email::{AsyncProtonEmailClient, AsyncSmtpClient, ProtonEmailClient, SmtpClient};
use super::provider::{AsyncNotifier, Notifier};
use super::webhook::{AsyncDiscordClient, AsyncGoogleChatClient, DiscordClient, GoogleChatClient};

/// Create a blocking notifier for a channel configuration.
///
/// Webhook variants build a blocking HTTP client, so call this outside of an
/// async runtime.
pub fn create_notifier(config: &ChannelConfig) -> Box<dyn Notifier> {
    match config {
        ChannelConfig::Discord(c) => Box::new(DiscordClient::new(c.webhook_url.clone())),
        ChannelConfig::GoogleChat(c) => Box::new(GoogleChatClient::new(c.webhook_url.clone())),
        ChannelConfig::Smtp(c) => Box::new(SmtpClient::new(
            c.server.clone(),
            c.port,
            c.from_address.clone(),
            c.username.clone(),
            c.password.clone(),
        )),
        ChannelConfig::Proton(c) => Box::new(ProtonEmailClient::new(
            c.email_address.clone(),
            c.smtp_token.clone(),
        )),
    }
}

/// Create an async notifier for a channel configuration.
pub fn create_async_notifier(config: &ChannelConfig) -> Box<dyn AsyncNotifier> {
    match config {
        ChannelConfig::Discord(c) => Box::new(AsyncDiscordClient::new(c.webhook_url.clone())),
        ChannelConfig::GoogleChat(c) => {
            Box::new(AsyncGoogleChatClient::new(c.webhook_url.clone()))
        }
        ChannelConfig::Smtp(c) => Box::new(AsyncSmtpClient::new(
            c.server.clone(),
            c.port,
            c.from_address.clone(),
            c.username.clone(),
            c.password.clone(),
        )),
        ChannelConfig::Proton(c) => Box::new(AsyncProtonEmailClient::new(
            c.email_address.clone(),
            c.smtp_token.clone(),
        )),
    }
}
