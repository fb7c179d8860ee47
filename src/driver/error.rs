//! Errors raised by automation channels.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Could not reach the WebDriver server.
    #[error("failed to reach WebDriver at {url}: {reason}")]
    Connection { url: String, reason: String },

    /// The server answered with a W3C error object.
    #[error("WebDriver error {status} ({code}): {message}")]
    Http { status: u16, code: String, message: String },

    /// Response did not have the expected shape.
    #[error("WebDriver protocol error: {detail}")]
    Protocol { detail: String },

    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("element {locator} not present after {timeout:?}")]
    WaitTimeout { locator: String, timeout: Duration },

    #[error("automation session already closed")]
    SessionClosed,
}
