//! Error taxonomy for user-initiated actions.
//!
//! Uploads and mutations carry the fixed, user-facing messages the forms
//! display; query failures pass the database error through unchanged. Every
//! failure is terminal for the action that produced it — no retries.

use thiserror::Error;

use jobdeck_auth::AuthError;
use jobdeck_storage::StorageError;
use jobdeck_supabase::DbError;

/// Result type for API wrapper calls.
pub type ApiCallResult<T> = Result<T, ApiCallError>;

#[derive(Debug, Error)]
pub enum ApiCallError {
    /// Missing session/token: the whole call fails before it starts.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Upload failure, surfaced as a form-level message.
    #[error("{message}")]
    Upload {
        message: &'static str,
        #[source]
        source: StorageError,
    },

    /// Mutation failure, surfaced as a form-level message.
    #[error("{message}")]
    Mutation {
        message: &'static str,
        #[source]
        source: Option<DbError>,
    },

    /// Query failure: propagated, never collapsed into "no data".
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),
}

impl ApiCallError {
    pub fn upload(message: &'static str, source: StorageError) -> Self {
        Self::Upload { message, source }
    }

    pub fn mutation(message: &'static str, source: DbError) -> Self {
        Self::Mutation {
            message,
            source: Some(source),
        }
    }

    /// Mutation reported success but returned no representation.
    pub fn mutation_empty(message: &'static str) -> Self {
        Self::Mutation {
            message,
            source: None,
        }
    }

    /// The message a form shows for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
