//! Onboarding: pick candidate or recruiter once, then move on.

use std::sync::Arc;

use tracing::{error, info};

use jobdeck_auth::{RoleWriter, UserProfile};
use jobdeck_models::Role;

use crate::routes::Route;

/// Role-selection controller.
pub struct OnboardingPage {
    roles: Arc<dyn RoleWriter>,
}

impl OnboardingPage {
    pub fn new(roles: Arc<dyn RoleWriter>) -> Self {
        Self { roles }
    }

    /// Where a role lands after onboarding: recruiters go post a job,
    /// candidates go browse.
    pub fn landing_route_for(role: Role) -> Option<Route> {
        match role {
            Role::Recruiter => Some(Route::PostJob),
            Role::Candidate => Some(Route::Jobs),
            Role::Unset => None,
        }
    }

    /// Users who already picked a role skip the screen entirely.
    pub fn resume_route(user: &UserProfile) -> Option<Route> {
        Self::landing_route_for(user.role)
    }

    /// Persist the selection in the provider's user metadata.
    ///
    /// Single fire-and-forget mutation: on failure the error is logged and
    /// `None` is returned — no navigation, nothing surfaced beyond the log,
    /// and nothing to roll back.
    pub async fn select_role(&self, user: &UserProfile, role: Role) -> Option<Route> {
        match self.roles.update_role(&user.id, role).await {
            Ok(()) => {
                info!(user_id = %user.id, role = ?role, "role updated");
                Self::landing_route_for(role)
            }
            Err(e) => {
                error!("Error updating role: {}", e);
                None
            }
        }
    }
}
