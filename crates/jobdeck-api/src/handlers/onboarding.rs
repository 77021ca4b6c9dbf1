//! Onboarding handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use jobdeck_app::pages::OnboardingPage;
use jobdeck_auth::RoleWriter;
use jobdeck_models::{Role, RoleSelection};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub role: Role,
    /// Where to go when the role is already set.
    pub redirect_to: Option<String>,
}

/// `GET /onboarding` — current role plus the skip-ahead target when one is
/// already set.
pub async fn view(auth: AuthUser) -> ApiResult<Json<OnboardingView>> {
    let profile = auth.profile();
    Ok(Json(OnboardingView {
        role: profile.role,
        redirect_to: OnboardingPage::resume_route(&profile).map(|r| r.path()),
    }))
}

#[derive(Debug, Serialize)]
pub struct SelectRoleResponse {
    /// `None` when the provider update failed; the error is logged, the
    /// user stays put and may retry.
    pub redirect_to: Option<String>,
}

/// `POST /onboarding` — persist the role choice.
pub async fn select_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(selection): Json<RoleSelection>,
) -> ApiResult<Json<SelectRoleResponse>> {
    let writer: Arc<dyn RoleWriter> = state.clerk.clone();
    let page = OnboardingPage::new(writer);
    let target = page.select_role(&auth.profile(), selection.role).await;

    Ok(Json(SelectRoleResponse {
        redirect_to: target.map(|r| r.path()),
    }))
}
