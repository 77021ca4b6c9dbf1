//! Session-token authentication against the identity provider's JWKS.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use jobdeck_auth::{AccessToken, BearerProvider, ClerkConfig, Session, SessionState, SharedSession, UserProfile};
use jobdeck_models::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// JWKS cache TTL.
const JWKS_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Decoded session-token claims.
///
/// The backend token template carries the user metadata the app reads
/// (display name and role) alongside the standard registered claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    /// Session ID
    #[serde(default)]
    pub sid: Option<String>,
    /// Issuer (the provider frontend API)
    pub iss: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated user extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub session_id: String,
    pub full_name: Option<String>,
    pub role: Role,
    /// The verified bearer token; it doubles as the database access token.
    pub token: AccessToken,
}

impl AuthUser {
    pub fn from_claims(claims: SessionClaims, token: AccessToken) -> Self {
        let role = Role::from_metadata(
            claims
                .user_metadata
                .as_ref()
                .and_then(|m| m.role.as_deref()),
        );
        Self {
            session_id: claims.sid.clone().unwrap_or_else(|| claims.sub.clone()),
            uid: claims.sub,
            full_name: claims.full_name,
            role,
            token,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.uid.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
        }
    }

    /// Per-request session handle for the app layer; token minting hands
    /// back the already-verified bearer.
    pub fn shared_session(&self) -> SharedSession {
        let provider = Arc::new(BearerProvider::new(self.token.clone()));
        SharedSession::new(SessionState::SignedIn(Session::new(
            self.session_id.clone(),
            self.profile(),
            provider,
        )))
    }
}

/// JWKS response from the provider.
#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<JwkKey>,
}

#[derive(Debug, Clone, Deserialize)]
struct JwkKey {
    kid: String,
    n: String,
    e: String,
}

/// Cached JWKS keys with TTL refresh.
pub struct JwksCache {
    http: Client,
    jwks_url: String,
    issuer: String,
    keys: RwLock<HashMap<String, DecodingKey>>,
    last_refresh: RwLock<Instant>,
}

impl JwksCache {
    /// Create a new cache and load the initial key set.
    pub async fn new(config: &ClerkConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::internal(e.to_string()))?;

        let cache = Self {
            http,
            jwks_url: config.jwks_url(),
            issuer: config.frontend_api.clone(),
            keys: RwLock::new(HashMap::new()),
            last_refresh: RwLock::new(Instant::now() - JWKS_CACHE_TTL),
        };

        cache.refresh_keys().await?;
        Ok(cache)
    }

    async fn refresh_keys(&self) -> Result<(), ApiError> {
        debug!("refreshing JWKS keys");

        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("JWKS fetch failed: {}", e)))?;
        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| ApiError::internal(format!("JWKS decode failed: {}", e)))?;

        let mut keys = HashMap::new();
        for jwk in jwks.keys {
            let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
                .map_err(|e| ApiError::internal(format!("bad JWK {}: {}", jwk.kid, e)))?;
            keys.insert(jwk.kid, key);
        }

        let key_count = keys.len();
        *self.keys.write().await = keys;
        *self.last_refresh.write().await = Instant::now();

        debug!("refreshed {} JWKS keys", key_count);
        Ok(())
    }

    async fn get_key(&self, kid: &str) -> Option<DecodingKey> {
        let needs_refresh = {
            let last = self.last_refresh.read().await;
            last.elapsed() > JWKS_CACHE_TTL
        };

        if needs_refresh {
            if let Err(e) = self.refresh_keys().await {
                warn!("failed to refresh JWKS keys: {}", e);
            }
        }

        self.keys.read().await.get(kid).cloned()
    }

    /// Verify a session token.
    pub async fn verify_token(&self, token: &str) -> Result<SessionClaims, ApiError> {
        let header = decode_header(token)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token header: {}", e)))?;

        let kid = header
            .kid
            .ok_or_else(|| ApiError::unauthorized("Token missing key ID"))?;

        let key = self
            .get_key(&kid)
            .await
            .ok_or_else(|| ApiError::unauthorized("Unknown key ID"))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        // Template tokens carry a provider-specific audience.
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| ApiError::unauthorized(format!("Token validation failed: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Bearer token from the Authorization header.
pub fn bearer_token(parts: &axum::http::HeaderMap) -> Option<String> {
    parts
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Axum extractor for the authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The gate middleware verified the token already on gated routes.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let claims = state.jwks.verify_token(&token).await?;
        Ok(AuthUser::from_claims(claims, AccessToken::new(token)))
    }
}
