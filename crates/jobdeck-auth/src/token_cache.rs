//! Token caching for backend access tokens.
//!
//! Thread-safe, async-aware cache with a refresh margin, a single-flight
//! refresh path (read-lock fast path, write-lock double-check), and a
//! graceful fallback to a still-usable token when a refresh fails.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::AuthResult;
use crate::provider::TokenProvider;
use crate::token::AccessToken;

/// Refresh the token this long before it expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(10);

/// Provider session tokens are short-lived; the mint response carries no
/// machine-readable expiry, so we assume a conservative TTL.
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(55);

struct CachedToken {
    token: AccessToken,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }

    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Cache for one session's minted backend tokens.
pub struct TokenCache {
    cache: RwLock<Option<CachedToken>>,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(None),
        }
    }

    /// Drop the cached token so the next request mints a fresh one.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    /// Get a valid token, minting through the provider if necessary.
    pub async fn get_or_mint(
        &self,
        provider: &dyn TokenProvider,
        session_id: &str,
        template: &str,
    ) -> AuthResult<AccessToken> {
        // Fast path under the read lock.
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Double-check: another task may have refreshed while we waited.
        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(cached.token.clone());
            }
        }

        match provider.mint_token(session_id, template).await {
            Ok(token) => {
                *cache = Some(CachedToken {
                    token: token.clone(),
                    expires_at: Instant::now() + TOKEN_DEFAULT_TTL,
                });
                debug!("minted fresh backend access token");
                Ok(token)
            }
            Err(e) => {
                if let Some(cached) = cache.as_ref() {
                    if cached.is_usable() {
                        warn!("token mint failed, using existing token: {}", e);
                        return Ok(cached.token.clone());
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingProvider {
        mints: AtomicU32,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                mints: AtomicU32::new(0),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl TokenProvider for CountingProvider {
        async fn mint_token(&self, _session_id: &str, _template: &str) -> AuthResult<AccessToken> {
            let n = self.mints.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                Err(AuthError::provider(503, "mint unavailable"))
            } else {
                Ok(AccessToken::new(format!("token-{}", n)))
            }
        }
    }

    #[tokio::test]
    async fn second_request_within_ttl_reuses_cached_token() {
        let cache = TokenCache::new();
        let provider = CountingProvider::new(false);

        let a = cache.get_or_mint(&provider, "sess_1", "supabase").await.unwrap();
        let b = cache.get_or_mint(&provider, "sess_1", "supabase").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(provider.mints.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_mint() {
        let cache = TokenCache::new();
        let provider = CountingProvider::new(false);

        let a = cache.get_or_mint(&provider, "sess_1", "supabase").await.unwrap();
        cache.invalidate().await;
        let b = cache.get_or_mint(&provider, "sess_1", "supabase").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(provider.mints.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mint_failure_without_cached_token_propagates() {
        let cache = TokenCache::new();
        let provider = CountingProvider::new(true);

        let err = cache
            .get_or_mint(&provider, "sess_1", "supabase")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Provider { status: 503, .. }));
    }
}
