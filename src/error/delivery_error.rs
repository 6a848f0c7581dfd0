use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by every send operation in this crate.
///
/// A send either completes (the remote service accepted the message) or
/// fails with one of these variants. There is no partial-success state.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The HTTP request could not be sent or its response could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-2xx status
    #[error("{service} returned {status}: {body}")]
    Rejected {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Connection, TLS negotiation, authentication or submission failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    /// An email channel was asked to deliver a message without a recipient
    #[error("No recipient given for {0} notification")]
    MissingRecipient(&'static str),

    /// The client was closed before the call
    #[error("Client is closed")]
    Closed,
}

/// Type alias for Result with DeliveryError to simplify function signatures
pub type DeliveryResult<T> = Result<T, DeliveryError>;
