//! Notification channel configuration.

use serde::{Deserialize, Serialize};

/// Channel type for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Discord,
    GoogleChat,
    Smtp,
    Proton,
}

impl ChannelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Discord => "discord",
            ChannelType::GoogleChat => "google_chat",
            ChannelType::Smtp => "smtp",
            ChannelType::Proton => "proton",
        }
    }
}

/// Channel-specific configuration, tagged by `type`.
///
/// ```toml
/// [channels.ops]
/// type = "discord"
/// webhook_url = "https://discord.com/api/webhooks/123/abc"
///
/// [channels.mail]
/// type = "smtp"
/// server = "smtp.server.com"
/// port = 587
/// from_address = "alerts@example.com"
/// username = "alerts"
/// password = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelConfig {
    Discord(WebhookConfig),
    GoogleChat(WebhookConfig),
    Smtp(SmtpConfig),
    Proton(ProtonConfig),
}

impl ChannelConfig {
    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelConfig::Discord(_) => ChannelType::Discord,
            ChannelConfig::GoogleChat(_) => ChannelType::GoogleChat,
            ChannelConfig::Smtp(_) => ChannelType::Smtp,
            ChannelConfig::Proton(_) => ChannelType::Proton,
        }
    }
}

/// Webhook configuration (Discord, Google Chat)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub webhook_url: String,
}

/// Generic SMTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub from_address: String,
    pub username: String,
    pub password: String,
}

/// Proton Mail configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtonConfig {
    pub email_address: String,
    pub smtp_token: String,
}
