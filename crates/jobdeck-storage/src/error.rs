//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to configure storage client: {0}")]
    Config(String),

    #[error("upload failed ({status}): {message}")]
    UploadFailed { status: u16, message: String },

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl StorageError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn upload_failed(status: u16, message: impl Into<String>) -> Self {
        Self::UploadFailed {
            status,
            message: message.into(),
        }
    }
}
