//! Identity-provider clients.
//!
//! The provider is reached through two narrow trait seams so data-access
//! code never depends on a concrete vendor: `TokenProvider` mints scoped
//! backend tokens, `RoleWriter` persists the onboarding role choice.

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use jobdeck_models::Role;

use crate::error::{AuthError, AuthResult};
use crate::token::AccessToken;

/// Mints short-lived backend access tokens for a session.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn mint_token(&self, session_id: &str, template: &str) -> AuthResult<AccessToken>;
}

/// Writes the role attribute into the provider's user metadata.
#[async_trait]
pub trait RoleWriter: Send + Sync {
    async fn update_role(&self, user_id: &str, role: Role) -> AuthResult<()>;
}

// =============================================================================
// Configuration
// =============================================================================

/// Clerk-style provider configuration.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// Frontend API base URL, e.g. `https://clerk.example.com`.
    pub frontend_api: String,
    /// Publishable key. Required at startup; absence is fatal.
    pub publishable_key: String,
}

impl ClerkConfig {
    /// Create config from environment variables.
    ///
    /// `CLERK_PUBLISHABLE_KEY` is mandatory. `CLERK_FRONTEND_API` may be set
    /// explicitly; otherwise it is derived from the publishable key, which
    /// encodes the frontend API domain.
    pub fn from_env() -> AuthResult<Self> {
        let publishable_key = std::env::var("CLERK_PUBLISHABLE_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AuthError::missing_credential("CLERK_PUBLISHABLE_KEY"))?;

        let frontend_api = match std::env::var("CLERK_FRONTEND_API") {
            Ok(url) if !url.is_empty() => url,
            _ => frontend_api_from_key(&publishable_key).ok_or_else(|| {
                AuthError::InvalidResponse(
                    "CLERK_FRONTEND_API not set and not derivable from the publishable key"
                        .to_string(),
                )
            })?,
        };

        Ok(Self {
            frontend_api: frontend_api.trim_end_matches('/').to_string(),
            publishable_key,
        })
    }

    /// JWKS endpoint for verifying session tokens.
    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.frontend_api)
    }
}

/// Publishable keys look like `pk_test_<base64(frontend-api-domain + "$")>`.
fn frontend_api_from_key(key: &str) -> Option<String> {
    let encoded = key
        .strip_prefix("pk_test_")
        .or_else(|| key.strip_prefix("pk_live_"))?;

    let decoded = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .ok()?;
    let domain = String::from_utf8(decoded).ok()?;
    let domain = domain.trim_end_matches('$');
    if domain.is_empty() {
        return None;
    }
    Some(format!("https://{}", domain))
}

// =============================================================================
// Clerk REST client
// =============================================================================

#[derive(Debug, Deserialize)]
struct MintedToken {
    jwt: String,
}

/// REST client for the hosted identity provider.
pub struct ClerkProvider {
    http: Client,
    config: ClerkConfig,
}

impl ClerkProvider {
    /// Create a new provider client.
    ///
    /// No request timeout is configured: nothing on the fetch path has one.
    pub fn new(config: ClerkConfig) -> AuthResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("jobdeck-auth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AuthError::Network)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> AuthResult<Self> {
        Self::new(ClerkConfig::from_env()?)
    }

    pub fn config(&self) -> &ClerkConfig {
        &self.config
    }

    async fn error_from(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        AuthError::provider(status, message)
    }
}

#[async_trait]
impl TokenProvider for ClerkProvider {
    async fn mint_token(&self, session_id: &str, template: &str) -> AuthResult<AccessToken> {
        let url = format!(
            "{}/v1/sessions/{}/tokens/{}",
            self.config.frontend_api, session_id, template
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.publishable_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let minted: MintedToken = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        debug!(template = %template, "minted backend token");
        Ok(AccessToken::new(minted.jwt))
    }
}

#[async_trait]
impl RoleWriter for ClerkProvider {
    async fn update_role(&self, user_id: &str, role: Role) -> AuthResult<()> {
        let value = role.metadata_value().ok_or(AuthError::UnsetRole)?;
        let url = format!("{}/v1/users/{}/metadata", self.config.frontend_api, user_id);

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.publishable_key)
            .json(&serde_json::json!({ "unsafe_metadata": { "role": value } }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}

// =============================================================================
// Bearer pass-through
// =============================================================================

/// Provider that hands back a token it was constructed with.
///
/// The BFF verifies the request's bearer token against the provider's JWKS;
/// that same token is what the backend template mints, so per-request
/// sessions use it directly instead of a network round-trip.
pub struct BearerProvider {
    token: AccessToken,
}

impl BearerProvider {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for BearerProvider {
    async fn mint_token(&self, _session_id: &str, _template: &str) -> AuthResult<AccessToken> {
        Ok(self.token.clone())
    }
}
