//! Discord webhook notifier.
//!
//! Discord API Reference: https://discord.com/developers/docs/resources/webhook#execute-webhook

use super::{AsyncWebhookClient, WebhookClient, WebhookService};

/// Discord webhook service: `{"content": "<message>"}`
#[derive(Debug, Clone, Copy)]
pub struct Discord;

impl WebhookService for Discord {
    const NAME: &'static str = "discord";
    const PAYLOAD_KEY: &'static str = "content";
}

/// Blocking Discord client.
///
/// # Example
/// ```no_run
/// use message_sender::DiscordClient;
///
/// let client = DiscordClient::new("https://discord.com/api/webhooks/123/abc");
/// client.send_message("Some test message")?;
/// # Ok::<(), message_sender::DeliveryError>(())
/// ```
pub type DiscordClient = WebhookClient<Discord>;

/// Async Discord client.
///
/// # Example
/// ```no_run
/// use message_sender::AsyncDiscordClient;
///
/// # async fn run() -> Result<(), message_sender::DeliveryError> {
/// let mut client = AsyncDiscordClient::new("https://discord.com/api/webhooks/123/abc");
/// client.send_message("Some test message").await?;
/// client.close().await;
/// # Ok(())
/// # }
/// ```
pub type AsyncDiscordClient = AsyncWebhookClient<Discord>;
