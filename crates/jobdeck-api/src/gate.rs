//! Access-control gate middleware.
//!
//! HTTP rendition of the client-side gate: evaluates the same policy per
//! request and answers redirects instead of rendering. Signed-out requests
//! to protected routes bounce to the landing page with the sign-in marker;
//! signed-in users without a role bounce to onboarding.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use jobdeck_app::{evaluate_gate, GateDecision};
use jobdeck_auth::{AccessToken, SessionState};

use crate::auth::{bearer_token, AuthUser};
use crate::state::AppState;

/// Gate for protected routes.
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let path = request.uri().path().to_string();

    let auth_user = match bearer_token(request.headers()) {
        Some(token) => match state.jwks.verify_token(&token).await {
            Ok(claims) => Some(AuthUser::from_claims(claims, AccessToken::new(token))),
            Err(_) => None,
        },
        None => None,
    };

    let session_state = match &auth_user {
        Some(user) => {
            let session = user.shared_session();
            session.snapshot().await
        }
        None => SessionState::SignedOut,
    };

    match evaluate_gate(&session_state, &path) {
        // Wait cannot occur server-side: sign-in resolves synchronously
        // from the request's bearer token.
        GateDecision::Allow | GateDecision::Wait => {
            if let Some(user) = auth_user {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        decision => {
            let target = decision
                .redirect_target()
                .expect("redirect decisions carry a target");
            Redirect::to(target).into_response()
        }
    }
}
