//! Email notifiers over SMTP.

mod message;
mod proton;
mod smtp;
mod tls;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use message::{EmailEnvelope, PreparedEmail};
pub use proton::{
    AsyncProtonEmailClient, PROTON_SMTP_PORT, PROTON_SMTP_SERVER, ProtonEmailClient,
    proton_settings,
};
pub use smtp::{AsyncSmtpClient, SmtpClient, SmtpSettings};
pub use tls::{IMPLICIT_TLS_PORT, SessionStep, TlsMode};
pub use transport::{
    AsyncLettreConnector, AsyncLettreSession, AsyncSmtpConnector, AsyncSmtpSession,
    LettreConnector, LettreSession, SmtpConnector, SmtpCredentials, SmtpSession,
};
