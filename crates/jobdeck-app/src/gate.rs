//! Access-control gate.
//!
//! Wraps every protected route. The policy is a total function over the
//! explicit session tri-state, so the loading-to-resolved transition can
//! never misfire a redirect the way sentinel comparisons can.

use jobdeck_auth::SessionState;
use jobdeck_models::Role;

use crate::routes;

/// What the gate decided for the current evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected content.
    Allow,
    /// Sign-in status not resolved yet; hold.
    Wait,
    /// Not signed in: go home with the sign-in prompt marker.
    RedirectSignIn,
    /// Signed in without a role: go pick one.
    RedirectOnboarding,
}

impl GateDecision {
    /// Redirect location, when this decision is a redirect.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GateDecision::RedirectSignIn => Some(routes::SIGN_IN_REDIRECT),
            GateDecision::RedirectOnboarding => Some(routes::ONBOARDING),
            GateDecision::Allow | GateDecision::Wait => None,
        }
    }
}

/// Evaluate the gate for a protected path.
///
/// Policy, in order: signed-out redirects to sign-in; a signed-in user with
/// no role redirects to onboarding unless already there; everything else is
/// allowed. Role absence is the only gating condition — unknown role values
/// have already collapsed to `Unset` at parse time.
pub fn evaluate_gate(state: &SessionState, path: &str) -> GateDecision {
    match state {
        SessionState::Loading => GateDecision::Wait,
        SessionState::SignedOut => GateDecision::RedirectSignIn,
        SessionState::SignedIn(session) => match session.user.role {
            Role::Unset if normalize(path) != routes::ONBOARDING => {
                GateDecision::RedirectOnboarding
            }
            Role::Unset | Role::Candidate | Role::Recruiter => GateDecision::Allow,
        },
    }
}

fn normalize(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}
