//! Session state.
//!
//! The sign-in tri-state is a closed enum rather than a pair of nullable
//! flags: `Loading` (provider not yet resolved), `SignedOut`, or
//! `SignedIn` with the user profile attached. Consumers receive a
//! `SharedSession` handle explicitly; there is no global.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use jobdeck_models::Role;

use crate::error::{AuthError, AuthResult};
use crate::provider::TokenProvider;
use crate::token::AccessToken;
use crate::token_cache::TokenCache;

/// Token template the provider mints for the managed database.
pub const BACKEND_TOKEN_TEMPLATE: &str = "supabase";

/// The signed-in user as seen by this app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Identity-provider user id.
    pub id: String,
    pub full_name: Option<String>,
    /// Parsed from the provider's metadata; unknown values are `Unset`.
    pub role: Role,
}

/// An active sign-in: session id, profile, and the means to mint backend
/// tokens for it.
#[derive(Clone)]
pub struct Session {
    pub id: String,
    pub user: UserProfile,
    provider: Arc<dyn TokenProvider>,
    tokens: Arc<TokenCache>,
}

impl Session {
    pub fn new(id: impl Into<String>, user: UserProfile, provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            id: id.into(),
            user,
            provider,
            tokens: Arc::new(TokenCache::new()),
        }
    }

    /// Mint (or reuse) a backend access token for this session.
    pub async fn access_token(&self) -> AuthResult<AccessToken> {
        self.tokens
            .get_or_mint(&*self.provider, &self.id, BACKEND_TOKEN_TEMPLATE)
            .await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Sign-in status, explicit and total.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// The provider has not resolved yet.
    #[default]
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::SignedIn(session) => Some(session.user.role),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }
}

/// Shared, read-mostly session handle injected into every data-access
/// component. The only writer is the sign-in/sign-out lifecycle.
#[derive(Clone, Default)]
pub struct SharedSession(Arc<RwLock<SessionState>>);

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    pub fn loading() -> Self {
        Self::new(SessionState::Loading)
    }

    pub fn signed_out() -> Self {
        Self::new(SessionState::SignedOut)
    }

    pub fn signed_in(session: Session) -> Self {
        Self::new(SessionState::SignedIn(session))
    }

    pub async fn snapshot(&self) -> SessionState {
        self.0.read().await.clone()
    }

    pub async fn set(&self, state: SessionState) {
        *self.0.write().await = state;
    }

    /// Mint a fresh access token from the current session.
    ///
    /// Fails the whole call when nothing is signed in, matching the fetch
    /// contract: loading and signed-out sessions have no token.
    pub async fn access_token(&self) -> AuthResult<AccessToken> {
        let state = self.0.read().await;
        match &*state {
            SessionState::SignedIn(session) => session.access_token().await,
            SessionState::Loading | SessionState::SignedOut => Err(AuthError::NoSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::BearerProvider;

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: "user_1".to_string(),
            full_name: Some("Asha Rao".to_string()),
            role,
        }
    }

    #[tokio::test]
    async fn signed_in_session_mints_through_its_provider() {
        let provider = Arc::new(BearerProvider::new(AccessToken::new("jwt-abc")));
        let session = Session::new("sess_1", profile(Role::Candidate), provider);
        let shared = SharedSession::signed_in(session);

        let token = shared.access_token().await.unwrap();
        assert_eq!(token.as_str(), "jwt-abc");
    }

    #[tokio::test]
    async fn loading_and_signed_out_have_no_token() {
        for shared in [SharedSession::loading(), SharedSession::signed_out()] {
            let err = shared.access_token().await.unwrap_err();
            assert!(matches!(err, AuthError::NoSession));
        }
    }

    #[tokio::test]
    async fn role_is_only_visible_when_signed_in() {
        assert_eq!(SharedSession::loading().snapshot().await.role(), None);

        let provider = Arc::new(BearerProvider::new(AccessToken::new("t")));
        let session = Session::new("sess_1", profile(Role::Recruiter), provider);
        assert_eq!(
            SessionState::SignedIn(session).role(),
            Some(Role::Recruiter)
        );
    }
}
