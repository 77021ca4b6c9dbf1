//! Database error types.

use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur during PostgREST operations.
///
/// Failures always propagate: "no rows" is an `Ok` value, never an error,
/// and an error is never collapsed into an empty result.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DbError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// HTTP status behind this error, when there is one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            DbError::Unauthorized(_) => Some(401),
            DbError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
