//! My-jobs handler: role-dependent content.

use axum::extract::State;
use axum::Json;

use jobdeck_app::pages::{MyJobsPage, MyJobsView};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /my-jobs` — created jobs for recruiters, own applications for
/// candidates.
pub async fn my_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyJobsView>> {
    let page = MyJobsPage::new(auth.shared_session(), state.db.clone());
    let view = page.load(&auth.profile()).await?;
    Ok(Json(view))
}
