//! Transport security selection for SMTP sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Port on which the server expects TLS from the first byte
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// Encrypted from the first byte, no STARTTLS command
    Implicit,
    /// Plaintext greeting, upgraded with STARTTLS before authenticating
    StartTls,
}

/// One protocol step performed after the connection is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    StartTls,
    Authenticate,
    Submit,
}

impl TlsMode {
    /// Port 465 means implicit TLS; every other port uses STARTTLS.
    pub fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            TlsMode::Implicit
        } else {
            TlsMode::StartTls
        }
    }

    /// Steps run between connect and quit, in order
    pub fn session_steps(self) -> &'static [SessionStep] {
        match self {
            TlsMode::Implicit => &[SessionStep::Authenticate, SessionStep::Submit],
            TlsMode::StartTls => &[
                SessionStep::StartTls,
                SessionStep::Authenticate,
                SessionStep::Submit,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TlsMode::Implicit => "implicit",
            TlsMode::StartTls => "starttls",
        }
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
