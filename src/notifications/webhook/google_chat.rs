//! Google Chat webhook notifier.
//!
//! To get a webhook URL, create a space in Google Chat, then open
//! Apps & integrations and add a webhook.

use super::{AsyncWebhookClient, WebhookClient, WebhookService};

/// Google Chat webhook service: `{"text": "<message>"}`
#[derive(Debug, Clone, Copy)]
pub struct GoogleChat;

impl WebhookService for GoogleChat {
    const NAME: &'static str = "google_chat";
    const PAYLOAD_KEY: &'static str = "text";
}

/// Blocking Google Chat client
pub type GoogleChatClient = WebhookClient<GoogleChat>;

/// Async Google Chat client
pub type AsyncGoogleChatClient = AsyncWebhookClient<GoogleChat>;
