//! Proton Mail SMTP preset.
//!
//! Proton's SMTP submission service only listens for STARTTLS on port 587 and
//! authenticates with the account address plus an SMTP token generated in the
//! Proton Mail settings. Everything else is the generic SMTP client.

use async_trait::async_trait;

use super::smtp::{AsyncSmtpClient, SmtpClient, SmtpSettings, require_recipient};
use super::tls::TlsMode;
use super::transport::{
    AsyncLettreConnector, AsyncSmtpConnector, LettreConnector, SmtpConnector,
};
use crate::error::DeliveryResult;
use crate::notifications::provider::{AsyncNotifier, NotificationMessage, Notifier};

pub const PROTON_SMTP_SERVER: &str = "smtp.protonmail.ch";
pub const PROTON_SMTP_PORT: u16 = 587;

/// Fixed Proton settings; the address doubles as sender and username.
///
/// TLS is pinned to STARTTLS rather than derived from the port.
pub fn proton_settings(
    email_address: impl Into<String>,
    smtp_token: impl Into<String>,
) -> SmtpSettings {
    let email_address = email_address.into();
    SmtpSettings::new(
        PROTON_SMTP_SERVER,
        PROTON_SMTP_PORT,
        email_address.clone(),
        email_address,
        smtp_token,
    )
    .with_tls(TlsMode::StartTls)
}

/// Blocking Proton Mail client
pub struct ProtonEmailClient<C = LettreConnector> {
    smtp: SmtpClient<C>,
}

impl ProtonEmailClient<LettreConnector> {
    pub fn new(email_address: impl Into<String>, smtp_token: impl Into<String>) -> Self {
        Self {
            smtp: SmtpClient::from_settings(proton_settings(email_address, smtp_token)),
        }
    }
}

impl<C: SmtpConnector> ProtonEmailClient<C> {
    pub fn with_connector(
        email_address: impl Into<String>,
        smtp_token: impl Into<String>,
        connector: C,
    ) -> Self {
        Self {
            smtp: SmtpClient::with_connector(proton_settings(email_address, smtp_token), connector),
        }
    }

    pub fn settings(&self) -> &SmtpSettings {
        self.smtp.settings()
    }

    pub fn send_email(
        &self,
        message: &str,
        email_to: &str,
        subject: &str,
        html_content: Option<&str>,
    ) -> DeliveryResult<()> {
        self.smtp.send_email(message, email_to, subject, html_content)
    }

    pub fn close(&mut self) {
        self.smtp.close();
    }
}

impl<C: SmtpConnector> Notifier for ProtonEmailClient<C> {
    fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        let to = require_recipient("proton", message)?;
        self.send_email(
            &message.body,
            to,
            message.title.as_deref().unwrap_or_default(),
            message.html_body.as_deref(),
        )
    }

    fn close(&mut self) {
        ProtonEmailClient::close(self);
    }

    fn name(&self) -> &'static str {
        "proton"
    }
}

/// Async Proton Mail client
pub struct AsyncProtonEmailClient<C = AsyncLettreConnector> {
    smtp: AsyncSmtpClient<C>,
}

impl AsyncProtonEmailClient<AsyncLettreConnector> {
    pub fn new(email_address: impl Into<String>, smtp_token: impl Into<String>) -> Self {
        Self {
            smtp: AsyncSmtpClient::from_settings(proton_settings(email_address, smtp_token)),
        }
    }
}

impl<C: AsyncSmtpConnector> AsyncProtonEmailClient<C> {
    pub fn with_connector(
        email_address: impl Into<String>,
        smtp_token: impl Into<String>,
        connector: C,
    ) -> Self {
        Self {
            smtp: AsyncSmtpClient::with_connector(
                proton_settings(email_address, smtp_token),
                connector,
            ),
        }
    }

    pub fn settings(&self) -> &SmtpSettings {
        self.smtp.settings()
    }

    pub async fn send_email(
        &self,
        message: &str,
        email_to: &str,
        subject: &str,
        html_content: Option<&str>,
    ) -> DeliveryResult<()> {
        self.smtp
            .send_email(message, email_to, subject, html_content)
            .await
    }

    pub async fn close(&mut self) {
        self.smtp.close().await;
    }
}

#[async_trait]
impl<C: AsyncSmtpConnector> AsyncNotifier for AsyncProtonEmailClient<C> {
    async fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        let to = require_recipient("proton", message)?;
        self.send_email(
            &message.body,
            to,
            message.title.as_deref().unwrap_or_default(),
            message.html_body.as_deref(),
        )
        .await
    }

    async fn close(&mut self) {
        AsyncProtonEmailClient::close(self).await;
    }

    fn name(&self) -> &'static str {
        "proton"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use crate::notifications::email::SmtpCredentials;
    use crate::notifications::email::testing::{Call, RecordingConnector};

    #[test]
    fn test_send_email_plain_text() {
        let connector = RecordingConnector::new();
        let client =
            ProtonEmailClient::with_connector("sender@proton.me", "test-token", connector.clone());
        client
            .send_email("Hello, World!", "recipient@example.com", "Test Subject", None)
            .unwrap();

        let calls = connector.calls();
        assert_eq!(
            calls[0],
            Call::Connect {
                server: "smtp.protonmail.ch".to_string(),
                port: 587,
                tls: TlsMode::StartTls,
            }
        );
        assert_eq!(calls[1], Call::StartTls);
        assert_eq!(
            calls[2],
            Call::Login(SmtpCredentials::new("sender@proton.me", "test-token"))
        );

        let sent = connector.submitted();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Test Subject");
        assert_eq!(sent[0].from, "sender@proton.me");
        assert_eq!(sent[0].to, "recipient@example.com");
        assert_eq!(sent[0].plain_body, "Hello, World!");
    }

    #[test]
    fn test_send_email_with_html() {
        let connector = RecordingConnector::new();
        let client =
            ProtonEmailClient::with_connector("sender@proton.me", "test-token", connector.clone());
        client
            .send_email(
                "Hello, World!",
                "recipient@example.com",
                "Test Subject",
                Some("<p>Hello, World!</p>"),
            )
            .unwrap();

        assert!(connector.submitted()[0].is_multipart());
    }

    #[test]
    fn test_preset_settings() {
        let settings = proton_settings("sender@proton.me", "test-token");
        assert_eq!(settings.server(), PROTON_SMTP_SERVER);
        assert_eq!(settings.port(), 587);
        assert_eq!(settings.tls(), TlsMode::StartTls);
        assert_eq!(settings.credentials().username, "sender@proton.me");
        assert_eq!(settings.credentials().password, "test-token");
        assert_eq!(settings.from_address(), "sender@proton.me");
    }

    #[test]
    fn test_notifier_name_and_recipient() {
        let client = ProtonEmailClient::with_connector(
            "sender@proton.me",
            "test-token",
            RecordingConnector::new(),
        );
        assert_eq!(Notifier::name(&client), "proton");
        assert!(matches!(
            Notifier::notify(&client, &NotificationMessage::new("Hi")),
            Err(DeliveryError::MissingRecipient("proton"))
        ));
    }

    #[tokio::test]
    async fn test_async_send_email_plain_text() {
        let connector = RecordingConnector::new();
        let client = AsyncProtonEmailClient::with_connector(
            "sender@proton.me",
            "test-token",
            connector.clone(),
        );
        client
            .send_email("Hello", "recipient@example.com", "Test", None)
            .await
            .unwrap();

        let calls = connector.calls();
        assert_eq!(
            calls[0],
            Call::Connect {
                server: "smtp.protonmail.ch".to_string(),
                port: 587,
                tls: TlsMode::StartTls,
            }
        );
        assert!(calls.contains(&Call::StartTls));
        assert!(calls.contains(&Call::Login(SmtpCredentials::new(
            "sender@proton.me",
            "test-token"
        ))));
        assert_eq!(calls.last(), Some(&Call::Quit));
    }

    #[tokio::test]
    async fn test_async_close_blocks_sends() {
        let connector = RecordingConnector::new();
        let mut client = AsyncProtonEmailClient::with_connector(
            "sender@proton.me",
            "test-token",
            connector.clone(),
        );
        client.close().await;

        let message = NotificationMessage::new("Hi").to("a@b.com");
        assert!(matches!(
            AsyncNotifier::notify(&client, &message).await,
            Err(DeliveryError::Closed)
        ));
        assert!(connector.calls().is_empty());
    }
}
