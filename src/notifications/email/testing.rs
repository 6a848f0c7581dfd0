//! Recording SMTP connectors for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::message::{EmailEnvelope, PreparedEmail};
use super::tls::TlsMode;
use super::transport::{
    AsyncSmtpConnector, AsyncSmtpSession, SmtpConnector, SmtpCredentials, SmtpSession,
};
use crate::error::{DeliveryError, DeliveryResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect {
        server: String,
        port: u16,
        tls: TlsMode,
    },
    StartTls,
    Login(SmtpCredentials),
    Submit(EmailEnvelope),
    Quit,
}

/// Step at which the fake server gives up. The failure surfaces as
/// [`DeliveryError::Closed`], as if the server dropped the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Connect,
    StartTls,
    Login,
    Submit,
}

#[derive(Clone, Default)]
pub struct RecordingConnector {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_at: Option<FailAt>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(stage: FailAt) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<EmailEnvelope> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(email) => Some(email),
                _ => None,
            })
            .collect()
    }

    fn open(&self, server: &str, port: u16, tls: TlsMode) -> DeliveryResult<RecordingSession> {
        record(
            &self.calls,
            self.fail_at,
            FailAt::Connect,
            Call::Connect {
                server: server.to_string(),
                port,
                tls,
            },
        )?;
        Ok(RecordingSession {
            calls: Arc::clone(&self.calls),
            fail_at: self.fail_at,
        })
    }
}

pub struct RecordingSession {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_at: Option<FailAt>,
}

fn record(
    calls: &Mutex<Vec<Call>>,
    fail_at: Option<FailAt>,
    stage: FailAt,
    call: Call,
) -> DeliveryResult<()> {
    calls.lock().unwrap().push(call);
    if fail_at == Some(stage) {
        return Err(DeliveryError::Closed);
    }
    Ok(())
}

impl SmtpConnector for RecordingConnector {
    type Session = RecordingSession;

    fn connect(&self, server: &str, port: u16, tls: TlsMode) -> DeliveryResult<RecordingSession> {
        self.open(server, port, tls)
    }
}

impl SmtpSession for RecordingSession {
    fn starttls(&mut self) -> DeliveryResult<()> {
        record(&self.calls, self.fail_at, FailAt::StartTls, Call::StartTls)
    }

    fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()> {
        record(
            &self.calls,
            self.fail_at,
            FailAt::Login,
            Call::Login(credentials.clone()),
        )
    }

    fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()> {
        record(
            &self.calls,
            self.fail_at,
            FailAt::Submit,
            Call::Submit(email.envelope().clone()),
        )
    }

    fn quit(&mut self) {
        self.calls.lock().unwrap().push(Call::Quit);
    }
}

#[async_trait]
impl AsyncSmtpConnector for RecordingConnector {
    type Session = RecordingSession;

    async fn connect(
        &self,
        server: &str,
        port: u16,
        tls: TlsMode,
    ) -> DeliveryResult<RecordingSession> {
        self.open(server, port, tls)
    }
}

#[async_trait]
impl AsyncSmtpSession for RecordingSession {
    async fn starttls(&mut self) -> DeliveryResult<()> {
        SmtpSession::starttls(self)
    }

    async fn login(&mut self, credentials: &SmtpCredentials) -> DeliveryResult<()> {
        SmtpSession::login(self, credentials)
    }

    async fn submit(&mut self, email: &PreparedEmail) -> DeliveryResult<()> {
        SmtpSession::submit(self, email)
    }

    async fn quit(&mut self) {
        SmtpSession::quit(self);
    }
}
