//! # Error Taxonomy
//!
//! Structured error handling for the monitoring core. Query-level failures
//! (timeout, refused, unreachable) are classified so they can be rendered as
//! human-readable responses instead of raw error strings.

use thiserror::Error;

/// Errors produced by the monitoring core and its collaborator seams.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The query did not complete within its budget.
    #[error("query timed out")]
    Timeout,

    /// The target actively refused the connection.
    #[error("connection refused by the target")]
    ConnectionRefused,

    /// The host could not be resolved or reached.
    #[error("target unreachable or name resolution failed")]
    Unreachable,

    /// The requested protocol is not in the registry.
    #[error("unsupported protocol: {0}")]
    ProtocolUnsupported(String),

    /// The notification surface rejected or failed an operation
    /// (message or channel missing, permissions revoked, transport error).
    #[error("notification surface unavailable: {0}")]
    NotificationSurface(String),

    /// A durable-store call failed.
    #[error("store unavailable: {0}")]
    Store(String),

    /// Invalid configuration or invalid operator input.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Anything the classifier could not place.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for WatchError {
    fn from(err: sqlx::Error) -> Self {
        WatchError::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
