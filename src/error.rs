// src/error.rs
//! Error taxonomy for a roster run.
//!
//! Fatal variants abort the run after the session is released.
//! `InvalidMonthPage` is recoverable: the assembler retries once and then
//! records a gap.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::driver::DriverError;

#[derive(Debug, Error)]
pub enum RosterError {
    /// A bounded login wait expired (login form or post-login landmark).
    #[error("login did not complete: `{element}` not present after {timeout:?}")]
    AuthenticationTimeout { element: String, timeout: Duration },

    /// The calendar page no longer carries the expected navigation link.
    #[error("calendar navigation control `{control}` not found")]
    NavigationControlMissing { control: String },

    /// The document has no month heading; it is not a calendar month page.
    #[error("not a calendar month page: heading `{heading_id}` missing")]
    InvalidMonthPage { heading_id: String },

    /// The form login did not lead to a signed-in page.
    #[error("login rejected: {reason}")]
    LoginRejected { reason: String },

    /// A plain HTTPS request of the browserless transport failed.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("automation channel: {0}")]
    Driver(#[from] DriverError),

    #[error("run cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RosterError {
    /// Recoverable errors are absorbed by the assembler as a gap.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RosterError::InvalidMonthPage { .. })
    }
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
