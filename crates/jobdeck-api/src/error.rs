//! API error types.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use jobdeck_app::ApiCallError;
use jobdeck_auth::AuthError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A user-initiated action that failed in the app layer; carries the
    /// form-level message.
    #[error("{0}")]
    Action(Arc<ApiCallError>),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Action(inner) => match inner.as_ref() {
                ApiCallError::Auth(_) => StatusCode::UNAUTHORIZED,
                ApiCallError::Forbidden(_) => StatusCode::FORBIDDEN,
                ApiCallError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiCallError::Validation(_) => StatusCode::BAD_REQUEST,
                ApiCallError::Upload { .. } | ApiCallError::Mutation { .. } | ApiCallError::Db(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<Arc<ApiCallError>> for ApiError {
    fn from(err: Arc<ApiCallError>) -> Self {
        Self::Action(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoSession => Self::unauthorized("No active session"),
            other => Self::internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Raw database errors stay out of production responses; the fixed
        // upload/mutation messages are already user-facing.
        let detail = match &self {
            ApiError::Internal(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            ApiError::Action(inner) => match inner.as_ref() {
                ApiCallError::Db(_) => {
                    if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                        "An internal error occurred".to_string()
                    } else {
                        inner.to_string()
                    }
                }
                _ => inner.user_message(),
            },
            _ => self.to_string(),
        };

        let body = ErrorResponse { detail };

        (status, Json(body)).into_response()
    }
}
