//! Webhook notifiers.
//!
//! Discord and Google Chat webhooks differ only in the JSON key that carries
//! the message text, so both are the same client parameterised by a
//! [`WebhookService`] marker. Payload construction and status handling are
//! shared by the blocking and the async client.

mod discord;
mod google_chat;

pub use discord::{AsyncDiscordClient, Discord, DiscordClient};
pub use google_chat::{AsyncGoogleChatClient, GoogleChat, GoogleChatClient};

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::provider::{AsyncNotifier, NotificationMessage, Notifier};
use crate::error::{DeliveryError, DeliveryResult};
use crate::external::client::{async_client, blocking_client};

/// Describes one webhook-based chat service.
pub trait WebhookService: Send + Sync + 'static {
    /// Provider name used in logs and errors
    const NAME: &'static str;

    /// JSON field that carries the message text
    const PAYLOAD_KEY: &'static str;

    /// Builds the JSON body for one message: `{ PAYLOAD_KEY: text }`
    fn payload(text: &str) -> Value {
        let mut body = Map::with_capacity(1);
        body.insert(Self::PAYLOAD_KEY.to_string(), Value::String(text.to_string()));
        Value::Object(body)
    }
}

/// Webhook URL owned by exactly one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    url: String,
}

impl WebhookEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn rejected<S: WebhookService>(status: StatusCode, body: String) -> DeliveryError {
    warn!(service = S::NAME, status = %status, "Webhook rejected message");
    DeliveryError::Rejected {
        service: S::NAME,
        status,
        body,
    }
}

/// Blocking webhook client.
///
/// The HTTP client is released by [`close`](Self::close) or when the value
/// is dropped, whichever comes first.
pub struct WebhookClient<S: WebhookService> {
    endpoint: WebhookEndpoint,
    http: Option<reqwest::blocking::Client>,
    service: PhantomData<S>,
}

impl<S: WebhookService> WebhookClient<S> {
    /// Creates a client for the given webhook URL. The URL is not validated.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            endpoint: WebhookEndpoint::new(webhook_url),
            http: Some(blocking_client()),
            service: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &WebhookEndpoint {
        &self.endpoint
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Posts `message` to the webhook, one request per call.
    ///
    /// # Errors
    /// [`DeliveryError::Rejected`] on a non-2xx response, [`DeliveryError::Http`]
    /// when the request fails, [`DeliveryError::Closed`] after `close`.
    pub fn send_message(&self, message: &str) -> DeliveryResult<()> {
        let http = self.http.as_ref().ok_or(DeliveryError::Closed)?;
        debug!(service = S::NAME, "Sending webhook message");

        let response = http
            .post(self.endpoint.url())
            .json(&S::payload(message))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(rejected::<S>(status, body));
        }

        info!(service = S::NAME, "Webhook message sent");
        Ok(())
    }

    /// Releases the HTTP client. Safe to call more than once.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!(service = S::NAME, "Webhook client closed");
        }
    }
}

impl<S: WebhookService> Drop for WebhookClient<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: WebhookService> Notifier for WebhookClient<S> {
    fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        self.send_message(&message.body)
    }

    fn close(&mut self) {
        WebhookClient::close(self);
    }

    fn name(&self) -> &'static str {
        S::NAME
    }
}

/// Async webhook client; same contract as [`WebhookClient`].
pub struct AsyncWebhookClient<S: WebhookService> {
    endpoint: WebhookEndpoint,
    http: Option<reqwest::Client>,
    service: PhantomData<S>,
}

impl<S: WebhookService> AsyncWebhookClient<S> {
    /// Creates a client for the given webhook URL. The URL is not validated.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            endpoint: WebhookEndpoint::new(webhook_url),
            http: Some(async_client()),
            service: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &WebhookEndpoint {
        &self.endpoint
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Posts `message` to the webhook, one request per call.
    ///
    /// # Errors
    /// Same as [`WebhookClient::send_message`].
    pub async fn send_message(&self, message: &str) -> DeliveryResult<()> {
        let http = self.http.as_ref().ok_or(DeliveryError::Closed)?;
        debug!(service = S::NAME, "Sending webhook message");

        let response = http
            .post(self.endpoint.url())
            .json(&S::payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejected::<S>(status, body));
        }

        info!(service = S::NAME, "Webhook message sent");
        Ok(())
    }

    /// Releases the HTTP client. Safe to call more than once.
    pub async fn close(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.http.take().is_some() {
            debug!(service = S::NAME, "Webhook client closed");
        }
    }
}

impl<S: WebhookService> Drop for AsyncWebhookClient<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[async_trait]
impl<S: WebhookService> AsyncNotifier for AsyncWebhookClient<S> {
    async fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        self.send_message(&message.body).await
    }

    async fn close(&mut self) {
        AsyncWebhookClient::close(self).await;
    }

    fn name(&self) -> &'static str {
        S::NAME
    }
}
