//! Saved-jobs handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use jobdeck_app::pages::{JobListingPage, SavedJobsPage};
use jobdeck_models::SavedJob;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /saved-jobs` — the signed-in user's saved jobs.
pub async fn list_saved(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SavedJob>>> {
    let page = SavedJobsPage::new(auth.shared_session(), state.db.clone());
    let saved = page.load(&auth.profile()).await?;
    Ok(Json(saved))
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub saved: bool,
}

/// `POST /saved-jobs/:job_id/toggle` — flip the favorite state.
pub async fn toggle_saved(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<i64>,
) -> ApiResult<Json<ToggleResponse>> {
    let page = JobListingPage::new(auth.shared_session(), state.db.clone());
    let saved = page.toggle_save(&auth.profile(), job_id).await?;
    Ok(Json(ToggleResponse { saved }))
}
