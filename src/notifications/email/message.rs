//! Email composition.

use lettre::Message;
use lettre::message::{Mailbox, MultiPart, SinglePart};

use crate::error::DeliveryResult;

/// One outgoing email, built per call and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEnvelope {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub plain_body: String,
    /// HTML alternative; `None` produces a single-part text/plain message
    pub html_body: Option<String>,
}

impl EmailEnvelope {
    /// An empty `html_body` is treated the same as no HTML part.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        plain_body: impl Into<String>,
        html_body: Option<&str>,
    ) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            to: to.into(),
            plain_body: plain_body.into(),
            html_body: html_body.filter(|html| !html.is_empty()).map(str::to_string),
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.html_body.is_some()
    }

    /// Builds the MIME message: plain text, or multipart/alternative with an HTML part.
    ///
    /// # Errors
    /// [`DeliveryError::Address`](crate::error::DeliveryError::Address) if the
    /// From or To address does not parse.
    pub fn to_message(&self) -> DeliveryResult<Message> {
        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = self.to.parse()?;
        let builder = Message::builder()
            .subject(self.subject.clone())
            .from(from)
            .to(to);

        let message = match &self.html_body {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                self.plain_body.clone(),
                html.clone(),
            ))?,
            None => builder.singlepart(SinglePart::plain(self.plain_body.clone()))?,
        };

        Ok(message)
    }

    /// Builds the MIME message up front, keeping the envelope alongside it.
    pub fn prepare(self) -> DeliveryResult<PreparedEmail> {
        let message = self.to_message()?;
        Ok(PreparedEmail {
            envelope: self,
            message,
        })
    }
}

/// An email whose addresses have been parsed and whose MIME body is built
#[derive(Debug, Clone)]
pub struct PreparedEmail {
    envelope: EmailEnvelope,
    message: Message,
}

impl PreparedEmail {
    pub fn envelope(&self) -> &EmailEnvelope {
        &self.envelope
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}
