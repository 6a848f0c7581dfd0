//! Generic SMTP notifier.
//!
//! Every email opens its own session: connect, optional STARTTLS,
//! authenticate, submit, quit. Quit runs on every path once the connection is
//! open, including when a step fails. The MIME message is built before
//! connecting, so an unparsable address never opens a session.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::message::{EmailEnvelope, PreparedEmail};
use super::tls::{SessionStep, TlsMode};
use super::transport::{
    AsyncLettreConnector, AsyncSmtpConnector, AsyncSmtpSession, LettreConnector, SmtpConnector,
    SmtpCredentials, SmtpSession,
};
use crate::error::{DeliveryError, DeliveryResult};
use crate::notifications::provider::{AsyncNotifier, NotificationMessage, Notifier};

/// Server, sender and credentials for one SMTP client
///
/// Fields are read-only so the TLS mode always matches the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub(crate) server: String,
    pub(crate) port: u16,
    pub(crate) from_address: String,
    pub(crate) credentials: SmtpCredentials,
    pub(crate) tls: TlsMode,
}

impl SmtpSettings {
    /// Settings whose TLS mode follows the port (465 implicit, otherwise STARTTLS)
    pub fn new(
        server: impl Into<String>,
        port: u16,
        from_address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port,
            from_address: from_address.into(),
            credentials: SmtpCredentials::new(username, password),
            tls: TlsMode::for_port(port),
        }
    }

    /// Pins the TLS mode regardless of the port; only presets use this.
    pub(crate) fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn credentials(&self) -> &SmtpCredentials {
        &self.credentials
    }

    pub fn tls(&self) -> TlsMode {
        self.tls
    }

    fn envelope(
        &self,
        message: &str,
        email_to: &str,
        subject: &str,
        html_content: Option<&str>,
    ) -> EmailEnvelope {
        EmailEnvelope::new(
            self.from_address.as_str(),
            email_to,
            subject,
            message,
            html_content,
        )
    }
}

fn log_outcome(settings: &SmtpSettings, result: &DeliveryResult<()>) {
    match result {
        Ok(()) => info!(server = %settings.server, port = settings.port, "Email sent"),
        Err(e) => warn!(server = %settings.server, port = settings.port, error = %e, "Email delivery failed"),
    }
}

pub(crate) fn require_recipient<'a>(
    channel: &'static str,
    message: &'a NotificationMessage,
) -> DeliveryResult<&'a str> {
    message
        .recipient
        .as_deref()
        .ok_or(DeliveryError::MissingRecipient(channel))
}

fn run_steps<S: SmtpSession>(
    session: &mut S,
    settings: &SmtpSettings,
    email: &PreparedEmail,
) -> DeliveryResult<()> {
    for step in settings.tls.session_steps() {
        match step {
            SessionStep::StartTls => session.starttls()?,
            SessionStep::Authenticate => session.login(&settings.credentials)?,
            SessionStep::Submit => session.submit(email)?,
        }
    }
    Ok(())
}

async fn run_steps_async<S: AsyncSmtpSession>(
    session: &mut S,
    settings: &SmtpSettings,
    email: &PreparedEmail,
) -> DeliveryResult<()> {
    for step in settings.tls.session_steps() {
        match step {
            SessionStep::StartTls => session.starttls().await?,
            SessionStep::Authenticate => session.login(&settings.credentials).await?,
            SessionStep::Submit => session.submit(email).await?,
        }
    }
    Ok(())
}

/// Blocking SMTP client.
///
/// # Example
/// ```no_run
/// use message_sender::SmtpClient;
///
/// let client = SmtpClient::new(
///     "smtp.server.com",
///     587,
///     "send_from@email.com",
///     "smtp_user",
///     "smtp_password",
/// );
/// client.send_email(
///     "Your message body",
///     "someone@email.com",
///     "Example",
///     Some("<p>Your HTML message body</p>"),
/// )?;
/// # Ok::<(), message_sender::DeliveryError>(())
/// ```
pub struct SmtpClient<C = LettreConnector> {
    settings: SmtpSettings,
    connector: C,
    closed: bool,
}

impl SmtpClient<LettreConnector> {
    pub fn new(
        server: impl Into<String>,
        port: u16,
        email_from: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::from_settings(SmtpSettings::new(
            server, port, email_from, user_name, password,
        ))
    }

    pub fn from_settings(settings: SmtpSettings) -> Self {
        Self::with_connector(settings, LettreConnector::default())
    }
}

impl<C: SmtpConnector> SmtpClient<C> {
    pub fn with_connector(settings: SmtpSettings, connector: C) -> Self {
        Self {
            settings,
            connector,
            closed: false,
        }
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sends one email through the SMTP server.
    ///
    /// `message` is the plain text body. If `html_content` is given (and not
    /// empty) it is attached as an HTML alternative.
    pub fn send_email(
        &self,
        message: &str,
        email_to: &str,
        subject: &str,
        html_content: Option<&str>,
    ) -> DeliveryResult<()> {
        if self.closed {
            return Err(DeliveryError::Closed);
        }
        let email = self.settings.envelope(message, email_to, subject, html_content);
        let result = email.prepare().and_then(|email| self.deliver(&email));
        log_outcome(&self.settings, &result);
        result
    }

    fn deliver(&self, email: &PreparedEmail) -> DeliveryResult<()> {
        let settings = &self.settings;
        debug!(server = %settings.server, port = settings.port, tls = %settings.tls, "Opening SMTP session");

        let mut session = self
            .connector
            .connect(&settings.server, settings.port, settings.tls)?;
        let result = run_steps(&mut session, settings, email);
        session.quit();
        result
    }

    /// Marks the client closed. Sessions are already closed after each email.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl<C: SmtpConnector> Notifier for SmtpClient<C> {
    fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        let to = require_recipient("smtp", message)?;
        self.send_email(
            &message.body,
            to,
            message.title.as_deref().unwrap_or_default(),
            message.html_body.as_deref(),
        )
    }

    fn close(&mut self) {
        SmtpClient::close(self);
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// Async SMTP client; same contract as [`SmtpClient`].
pub struct AsyncSmtpClient<C = AsyncLettreConnector> {
    settings: SmtpSettings,
    connector: C,
    closed: bool,
}

impl AsyncSmtpClient<AsyncLettreConnector> {
    pub fn new(
        server: impl Into<String>,
        port: u16,
        email_from: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::from_settings(SmtpSettings::new(
            server, port, email_from, user_name, password,
        ))
    }

    pub fn from_settings(settings: SmtpSettings) -> Self {
        Self::with_connector(settings, AsyncLettreConnector::default())
    }
}

impl<C: AsyncSmtpConnector> AsyncSmtpClient<C> {
    pub fn with_connector(settings: SmtpSettings, connector: C) -> Self {
        Self {
            settings,
            connector,
            closed: false,
        }
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub async fn send_email(
        &self,
        message: &str,
        email_to: &str,
        subject: &str,
        html_content: Option<&str>,
    ) -> DeliveryResult<()> {
        if self.closed {
            return Err(DeliveryError::Closed);
        }
        let email = self.settings.envelope(message, email_to, subject, html_content);
        let result = match email.prepare() {
            Ok(email) => self.deliver(&email).await,
            Err(e) => Err(e),
        };
        log_outcome(&self.settings, &result);
        result
    }

    async fn deliver(&self, email: &PreparedEmail) -> DeliveryResult<()> {
        let settings = &self.settings;
        debug!(server = %settings.server, port = settings.port, tls = %settings.tls, "Opening SMTP session");

        let mut session = self
            .connector
            .connect(&settings.server, settings.port, settings.tls)
            .await?;
        let result = run_steps_async(&mut session, settings, email).await;
        session.quit().await;
        result
    }

    pub async fn close(&mut self) {
        self.closed = true;
    }
}

#[async_trait]
impl<C: AsyncSmtpConnector> AsyncNotifier for AsyncSmtpClient<C> {
    async fn notify(&self, message: &NotificationMessage) -> DeliveryResult<()> {
        let to = require_recipient("smtp", message)?;
        self.send_email(
            &message.body,
            to,
            message.title.as_deref().unwrap_or_default(),
            message.html_body.as_deref(),
        )
        .await
    }

    async fn close(&mut self) {
        AsyncSmtpClient::close(self).await;
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::email::IMPLICIT_TLS_PORT;
    use crate::notifications::email::testing::{Call, FailAt, RecordingConnector};
    use proptest::prelude::*;

    fn settings(port: u16) -> SmtpSettings {
        SmtpSettings::new(
            "smtp.server.com",
            port,
            "sender@email.com",
            "test-user",
            "test-password",
        )
    }

    fn client(port: u16, connector: &RecordingConnector) -> SmtpClient<RecordingConnector> {
        SmtpClient::with_connector(settings(port), connector.clone())
    }

    #[test]
    fn test_send_email_plain_text_starttls() {
        let connector = RecordingConnector::new();
        client(587, &connector)
            .send_email("Hi", "a@b.com", "S", None)
            .unwrap();

        let expected_email = EmailEnvelope::new("sender@email.com", "a@b.com", "S", "Hi", None);
        assert_eq!(
            connector.calls(),
            vec![
                Call::Connect {
                    server: "smtp.server.com".to_string(),
                    port: 587,
                    tls: TlsMode::StartTls,
                },
                Call::StartTls,
                Call::Login(SmtpCredentials::new("test-user", "test-password")),
                Call::Submit(expected_email),
                Call::Quit,
            ]
        );
    }

    #[test]
    fn test_send_email_implicit_tls() {
        let connector = RecordingConnector::new();
        client(465, &connector)
            .send_email("Hi", "a@b.com", "S", None)
            .unwrap();

        let calls = connector.calls();
        assert_eq!(
            calls[0],
            Call::Connect {
                server: "smtp.server.com".to_string(),
                port: 465,
                tls: TlsMode::Implicit,
            }
        );
        assert!(!calls.contains(&Call::StartTls));
        assert_eq!(
            calls[1],
            Call::Login(SmtpCredentials::new("test-user", "test-password"))
        );
        assert_eq!(connector.submitted().len(), 1);
        assert_eq!(calls.last(), Some(&Call::Quit));
    }

    #[test]
    fn test_send_email_with_html() {
        let connector = RecordingConnector::new();
        client(587, &connector)
            .send_email(
                "Hello, World!",
                "recipient@example.com",
                "Test Subject",
                Some("<p>Hello, World!</p>"),
            )
            .unwrap();

        let sent = connector.submitted();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_multipart());
        assert_eq!(sent[0].html_body.as_deref(), Some("<p>Hello, World!</p>"));
        assert_eq!(sent[0].plain_body, "Hello, World!");
    }

    #[test]
    fn test_quit_after_failed_step() {
        for stage in [FailAt::StartTls, FailAt::Login, FailAt::Submit] {
            let connector = RecordingConnector::failing_at(stage);
            let result = client(587, &connector).send_email("Hi", "a@b.com", "S", None);

            assert!(result.is_err(), "{stage:?} should fail the send");
            assert_eq!(connector.calls().last(), Some(&Call::Quit));
        }
    }

    #[test]
    fn test_failed_starttls_never_authenticates() {
        let connector = RecordingConnector::failing_at(FailAt::StartTls);
        let _ = client(587, &connector).send_email("Hi", "a@b.com", "S", None);

        assert!(
            !connector
                .calls()
                .iter()
                .any(|call| matches!(call, Call::Login(_)))
        );
    }

    #[test]
    fn test_failed_connect_has_no_session() {
        let connector = RecordingConnector::failing_at(FailAt::Connect);
        let result = client(587, &connector).send_email("Hi", "a@b.com", "S", None);

        assert!(matches!(result, Err(DeliveryError::Closed)));
        assert_eq!(connector.calls().len(), 1);
    }

    #[test]
    fn test_invalid_recipient_never_connects() {
        let connector = RecordingConnector::new();
        let result = client(587, &connector).send_email("Hi", "not an address", "S", None);

        assert!(matches!(result, Err(DeliveryError::Address(_))));
        assert!(connector.calls().is_empty());
    }

    #[tokio::test]
    async fn test_async_invalid_sender_never_connects() {
        let connector = RecordingConnector::new();
        let settings = SmtpSettings::new("smtp.server.com", 465, "sender", "u", "p");
        let client = AsyncSmtpClient::with_connector(settings, connector.clone());

        let result = client.send_email("Hi", "a@b.com", "S", None).await;
        assert!(matches!(result, Err(DeliveryError::Address(_))));
        assert!(connector.calls().is_empty());
    }

    #[test]
    fn test_send_after_close() {
        let connector = RecordingConnector::new();
        let mut client = client(587, &connector);
        client.close();
        client.close();

        assert!(matches!(
            client.send_email("Hi", "a@b.com", "S", None),
            Err(DeliveryError::Closed)
        ));
        assert!(connector.calls().is_empty());
    }

    #[test]
    fn test_notifier_requires_recipient() {
        let connector = RecordingConnector::new();
        let client = client(587, &connector);

        let result = Notifier::notify(&client, &NotificationMessage::new("Hi"));
        assert!(matches!(result, Err(DeliveryError::MissingRecipient("smtp"))));

        let message = NotificationMessage::new("Hi").with_title("S").to("a@b.com");
        Notifier::notify(&client, &message).unwrap();
        let sent = connector.submitted();
        assert_eq!(sent[0].subject, "S");
        assert_eq!(sent[0].to, "a@b.com");
    }

    #[tokio::test]
    async fn test_async_send_email_starttls() {
        let connector = RecordingConnector::new();
        let client = AsyncSmtpClient::with_connector(settings(587), connector.clone());
        client
            .send_email("Hello, World!", "recipient@example.com", "Test Subject", None)
            .await
            .unwrap();

        let calls = connector.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[1], Call::StartTls);
        let sent = connector.submitted();
        assert_eq!(sent[0].subject, "Test Subject");
        assert_eq!(sent[0].from, "sender@email.com");
        assert_eq!(sent[0].to, "recipient@example.com");
        assert!(!sent[0].is_multipart());
    }

    #[tokio::test]
    async fn test_async_send_email_implicit_tls() {
        let connector = RecordingConnector::new();
        let client = AsyncSmtpClient::with_connector(settings(465), connector.clone());
        client
            .send_email("Hi", "a@b.com", "S", Some("<p>Hi</p>"))
            .await
            .unwrap();

        let calls = connector.calls();
        assert!(!calls.contains(&Call::StartTls));
        assert!(connector.submitted()[0].is_multipart());
        assert_eq!(calls.last(), Some(&Call::Quit));
    }

    #[tokio::test]
    async fn test_async_quit_after_failed_login() {
        let connector = RecordingConnector::failing_at(FailAt::Login);
        let mut client = AsyncSmtpClient::with_connector(settings(465), connector.clone());

        assert!(client.send_email("Hi", "a@b.com", "S", None).await.is_err());
        assert_eq!(connector.calls().last(), Some(&Call::Quit));
        assert!(connector.submitted().is_empty());

        client.close().await;
        assert!(client.is_closed());
    }

    proptest! {
        #[test]
        fn property_session_tls_follows_port(port in any::<u16>()) {
            let connector = RecordingConnector::new();
            client(port, &connector)
                .send_email("Hi", "a@b.com", "S", None)
                .unwrap();

            let calls = connector.calls();
            let expected = TlsMode::for_port(port);
            prop_assert_eq!(
                &calls[0],
                &Call::Connect {
                    server: "smtp.server.com".to_string(),
                    port,
                    tls: expected,
                }
            );
            prop_assert_eq!(calls.contains(&Call::StartTls), port != IMPLICIT_TLS_PORT);
        }
    }

    #[test]
    fn test_settings_follow_port() {
        assert_eq!(settings(465).tls, TlsMode::Implicit);
        assert_eq!(settings(587).tls, TlsMode::StartTls);
        assert_eq!(SmtpClient::new("h", 25, "a@b.com", "u", "p").settings().tls(), TlsMode::StartTls);

        let implicit = SmtpClient::new("h", 465, "a@b.com", "u", "p");
        assert_eq!(implicit.settings().tls(), TlsMode::Implicit);
        assert_eq!(implicit.settings().port(), 465);
        assert_eq!(implicit.settings().credentials().username, "u");
    }
}
