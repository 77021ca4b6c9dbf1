//! Application state.

use std::sync::Arc;

use jobdeck_auth::{ClerkConfig, ClerkProvider};
use jobdeck_storage::StorageClient;
use jobdeck_supabase::PostgrestClient;

use crate::auth::JwksCache;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub db: PostgrestClient,
    pub storage: StorageClient,
    pub clerk: Arc<ClerkProvider>,
    pub jwks: Arc<JwksCache>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Fails fast when required configuration is absent; a missing identity
    /// publishable key is fatal at startup.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let clerk_config = ClerkConfig::from_env()?;
        let jwks = JwksCache::new(&clerk_config).await?;
        let clerk = ClerkProvider::new(clerk_config)?;

        let db = PostgrestClient::from_env()?;
        let storage = StorageClient::from_env()?;

        Ok(Self {
            config,
            db,
            storage,
            clerk: Arc::new(clerk),
            jwks: Arc::new(jwks),
        })
    }
}
