//! PostgREST REST client.
//!
//! One HTTP call per operation, authenticated per call with the caller's
//! access token (`Authorization: Bearer …`) next to the project public key
//! (`apikey`). Row-level security on the backend scopes what each token
//! can see.

use std::time::Instant;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

use jobdeck_auth::AccessToken;

use crate::error::{DbError, DbResult};
use crate::filter::Filter;
use crate::metrics::record_request;

// =============================================================================
// Configuration
// =============================================================================

/// Managed database configuration.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Backend base URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Project public (anon) key.
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Create config from environment variables.
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| DbError::config("SUPABASE_URL not set"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| DbError::config("SUPABASE_ANON_KEY not set"))?;
        if url.is_empty() || anon_key.is_empty() {
            return Err(DbError::config("SUPABASE_URL and SUPABASE_ANON_KEY cannot be empty"));
        }
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the managed database's REST interface.
#[derive(Clone)]
pub struct PostgrestClient {
    http: Client,
    rest_url: String,
    anon_key: String,
}

impl PostgrestClient {
    /// Create a new client.
    ///
    /// Deliberately no request timeout: nothing on the fetch path has one,
    /// and a hung request is surfaced as an indefinitely loading fetcher.
    pub fn new(config: SupabaseConfig) -> DbResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("jobdeck-supabase/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DbError::Network)?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", config.url),
            anon_key: config.anon_key,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> DbResult<Self> {
        Self::new(SupabaseConfig::from_env()?)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authed(&self, builder: RequestBuilder, token: &AccessToken) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(token.as_str())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Select rows, optionally with embedded resources in `columns`
    /// (e.g. `*,company:companies(name,logo_url)`).
    pub async fn select<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> DbResult<Vec<T>> {
        let mut request = self
            .http
            .get(self.table_url(table))
            .query(&[("select", columns)]);
        for filter in filters {
            request = request.query(&[filter.query_pair()]);
        }

        self.execute("select", table, self.authed(request, token))
            .await
    }

    /// Select at most one row; zero rows is `Ok(None)`, not an error.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> DbResult<Option<T>> {
        let rows = self.select(token, table, columns, filters).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert rows, returning the created representation.
    pub async fn insert<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        table: &str,
        rows: &impl Serialize,
    ) -> DbResult<Vec<T>> {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows);

        self.execute("insert", table, self.authed(request, token))
            .await
    }

    /// Update matching rows, returning the new representation.
    pub async fn update<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        table: &str,
        patch: &impl Serialize,
        filters: &[Filter],
    ) -> DbResult<Vec<T>> {
        let mut request = self
            .http
            .patch(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(patch);
        for filter in filters {
            request = request.query(&[filter.query_pair()]);
        }

        self.execute("update", table, self.authed(request, token))
            .await
    }

    /// Delete matching rows, returning the deleted representation.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        table: &str,
        filters: &[Filter],
    ) -> DbResult<Vec<T>> {
        let mut request = self
            .http
            .delete(self.table_url(table))
            .header("Prefer", "return=representation");
        for filter in filters {
            request = request.query(&[filter.query_pair()]);
        }

        self.execute("delete", table, self.authed(request, token))
            .await
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Send a request inside a tracing span and record metrics.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        table: &str,
        request: RequestBuilder,
    ) -> DbResult<Vec<T>> {
        let span = info_span!("postgrest_request", operation = %operation, table = %table);

        let start = Instant::now();
        let result = async {
            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                let body = response.text().await.unwrap_or_default();
                return Err(DbError::Unauthorized(body));
            }

            if !status.is_success() {
                return Err(Self::error_from(status, response).await);
            }

            let rows: Vec<T> = response.json().await?;
            Ok(rows)
        }
        .instrument(span)
        .await;

        let latency_ms = start.elapsed().as_millis() as f64;
        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, table, status, latency_ms);

        result
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> DbError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .ok()
            .and_then(|e| match (e.message, e.details) {
                (Some(m), Some(d)) => Some(format!("{} ({})", m, d)),
                (Some(m), None) => Some(m),
                (None, Some(d)) => Some(d),
                (None, None) => None,
            })
            .unwrap_or(body);
        DbError::request_failed(status.as_u16(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn config_requires_url_and_key() {
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
        assert!(matches!(
            SupabaseConfig::from_env().unwrap_err(),
            DbError::Config(_)
        ));
    }

    #[test]
    #[serial]
    fn config_trims_trailing_slash() {
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
        let config = SupabaseConfig::from_env().unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
    }
}
