//! SMTP session seam.
//!
//! A connector opens one session per email; the client then walks the
//! session steps chosen by [`TlsMode`] and always quits. The lettre-backed
//! connectors are the defaults; tests substitute recording fakes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{AsyncSmtpConnection, SmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use tracing::debug;

use super::message::PreparedEmail;
use super::tls::TlsMode;
use crate::error::DeliveryResult;

/// lettre's own default command timeout
const SMTP_TIMEOUT: Duration = Duration::from_secs(60);

const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Username and password used for SMTP AUTH
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn to_lettre(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An open blocking SMTP session
pub trait SmtpSession {
    fn starttls(&mut self) -> DeliveryResult<()>;
    fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()>;
    fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()>;
    /// Ends the session; failures are logged, not returned
    fn quit(&mut self);
}

/// Opens blocking SMTP sessions
pub trait SmtpConnector: Send + Sync {
    type Session: SmtpSession;

    /// Connects and greets the server; with [`TlsMode::Implicit`] the socket is
    /// wrapped in TLS before the greeting.
    fn connect(&self, server: &str, port: u16, tls: TlsMode) -> DeliveryResult<Self::Session>;
}

/// An open async SMTP session
#[async_trait]
pub trait AsyncSmtpSession: Send {
    async fn starttls(&mut self) -> DeliveryResult<()>;
    async fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()>;
    async fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()>;
    async fn quit(&mut self);
}

/// Opens async SMTP sessions
#[async_trait]
pub trait AsyncSmtpConnector: Send + Sync {
    type Session: AsyncSmtpSession;

    async fn connect(&self, server: &str, port: u16, tls: TlsMode)
    -> DeliveryResult<Self::Session>;
}

/// Blocking connector over lettre's `SmtpConnection`
#[derive(Debug, Clone)]
pub struct LettreConnector {
    hello_name: ClientId,
}

impl Default for LettreConnector {
    fn default() -> Self {
        Self {
            hello_name: ClientId::default(),
        }
    }
}

pub struct LettreSession {
    connection: SmtpConnection,
    tls: TlsParameters,
    hello_name: ClientId,
}

impl SmtpConnector for LettreConnector {
    type Session = LettreSession;

    fn connect(&self, server: &str, port: u16, tls: TlsMode) -> DeliveryResult<LettreSession> {
        let parameters = TlsParameters::new(server.to_string())?;
        let wrapper = match tls {
            TlsMode::Implicit => Some(&parameters),
            TlsMode::StartTls => None,
        };

        let connection = SmtpConnection::connect(
            (server, port),
            Some(SMTP_TIMEOUT),
            &self.hello_name,
            wrapper,
            None,
        )?;

        Ok(LettreSession {
            connection,
            tls: parameters,
            hello_name: self.hello_name.clone(),
        })
    }
}

impl SmtpSession for LettreSession {
    fn starttls(&mut self) -> DeliveryResult<()> {
        self.connection.starttls(&self.tls, &self.hello_name)?;
        Ok(())
    }

    fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()> {
        self.connection
            .auth(AUTH_MECHANISMS, &credentials.to_lettre())?;
        Ok(())
    }

    fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()> {
        let message = email.message();
        self.connection
            .send(message.envelope(), &message.formatted())?;
        Ok(())
    }

    fn quit(&mut self) {
        if let Err(e) = self.connection.quit() {
            debug!(error = %e, "SMTP QUIT failed, dropping connection");
        }
    }
}

/// Async connector over lettre's tokio `AsyncSmtpConnection`
#[derive(Debug, Clone)]
pub struct AsyncLettreConnector {
    hello_name: ClientId,
}

impl Default for AsyncLettreConnector {
    fn default() -> Self {
        Self {
            hello_name: ClientId::default(),
        }
    }
}

pub struct AsyncLettreSession {
    connection: AsyncSmtpConnection,
    tls: TlsParameters,
    hello_name: ClientId,
}

#[async_trait]
impl AsyncSmtpConnector for AsyncLettreConnector {
    type Session = AsyncLettreSession;

    async fn connect(
        &self,
        server: &str,
        port: u16,
        tls: TlsMode,
    ) -> DeliveryResult<AsyncLettreSession> {
        let parameters = TlsParameters::new(server.to_string())?;
        let wrapper = match tls {
            TlsMode::Implicit => Some(parameters.clone()),
            TlsMode::StartTls => None,
        };

        let connection = AsyncSmtpConnection::connect_tokio1(
            (server, port),
            Some(SMTP_TIMEOUT),
            &self.hello_name,
            wrapper,
            None,
        )
        .await?;

        Ok(AsyncLettreSession {
            connection,
            tls: parameters,
            hello_name: self.hello_name.clone(),
        })
    }
}

#[async_trait]
impl AsyncSmtpSession for AsyncLettreSession {
    async fn starttls(&mut self) -> DeliveryResult<()> {
        self.connection
            .starttls(self.tls.clone(), &self.hello_name)
            .await?;
        Ok(())
    }

    async fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()> {
        self.connection
            .auth(AUTH_MECHANISMS, &credentials.to_lettre())
            .await?;
        Ok(())
    }

    async fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()> {
        let message = email.message();
        self.connection
            .send(message.envelope(), &message.formatted())
            .await?;
        Ok(())
    }

    async fn quit(&mut self) {
        if let Err(e) = self.connection.quit().await {
            debug!(error = %e, "SMTP QUIT failed, dropping connection");
        }
    }
}
