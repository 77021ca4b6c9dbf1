//! Route handlers.

pub mod companies;
pub mod jobs;
pub mod my_jobs;
pub mod onboarding;
pub mod saved;

use axum::extract::multipart::Field;
use axum::extract::RawQuery;
use axum::Json;
use serde_json::{json, Value};

use jobdeck_app::pages::{landing_view, LandingView};
use jobdeck_models::FileUpload;

use crate::error::ApiError;

/// Landing screen. Public; reads the sign-in marker the gate plants.
pub async fn landing(RawQuery(query): RawQuery) -> Json<LandingView> {
    Json(landing_view(query.as_deref()))
}

/// Liveness.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness.
pub async fn ready() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}

/// Read one multipart file field into an upload.
pub(crate) async fn read_file_field(field: Field<'_>) -> Result<FileUpload, ApiError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(format!("Upload read failed: {}", e)))?;

    Ok(FileUpload::new(file_name, content_type, bytes.to_vec()))
}
