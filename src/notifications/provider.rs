//! Core notifier traits and the transport-neutral message type.
//!
//! Every transport (Discord, Google Chat, generic SMTP, Proton Mail) is
//! exposed through the same two capabilities: `Notifier` for blocking callers
//! and `AsyncNotifier` for async callers.

use crate::error::DeliveryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message to be delivered through a notifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Subject line; only email channels use it
    pub title: Option<String>,
    /// Plain text body (required)
    pub body: String,
    /// HTML alternative body; only email channels use it
    pub html_body: Option<String>,
    /// Destination address; required by email channels, ignored by webhooks
    pub recipient: Option<String>,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }
}

/// Blocking notifier capability.
///
/// `close` is idempotent. Calling `notify` after `close` fails with
/// [`DeliveryError::Closed`](crate::error::DeliveryError::Closed).
pub trait Notifier: Send {
    /// Sends a notification message, returning once the remote service accepted it
    fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()>;

    /// Releases the underlying transport resources
    fn close(&mut self);

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;
}

/// Async notifier capability.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// The only suspension points are `notify` and `close`.
#[async_trait]
pub trait AsyncNotifier: Send + Sync {
    /// Sends a notification message, returning once the remote service accepted it
    async fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()>;

    /// Releases the underlying transport resources
    async fn close(&mut self);

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;
}
