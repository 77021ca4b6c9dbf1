//! Auth error types.

use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while talking to the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token was requested but no session is signed in.
    #[error("no active session")]
    NoSession,

    #[error("missing identity credential: {0}")]
    MissingCredential(String),

    #[error("provider request failed ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("cannot store an unset role")]
    UnsetRole,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential(name.into())
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }
}
