//! Storage REST client.

use reqwest::Client;
use tracing::debug;

use jobdeck_auth::AccessToken;

use crate::error::{StorageError, StorageResult};

/// Logical buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Candidate resume documents.
    Resumes,
    /// Company logo assets.
    CompanyLogo,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Resumes => "resumes",
            Bucket::CompanyLogo => "company-logo",
        }
    }
}

/// Storage configuration; shares the backend base URL and public key with
/// the database client.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub anon_key: String,
}

impl StorageConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| StorageError::config("SUPABASE_URL not set"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| StorageError::config("SUPABASE_ANON_KEY not set"))?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

/// Client for the managed object storage.
#[derive(Clone)]
pub struct StorageClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl StorageClient {
    /// Create a new storage client. No request timeout, like the rest of
    /// the fetch path.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("jobdeck-storage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StorageError::Network)?;

        Ok(Self {
            http,
            base_url: config.url,
            anon_key: config.anon_key,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::new(StorageConfig::from_env()?)
    }

    /// Upload an object.
    ///
    /// Upsert is enabled: a key collision silently overwrites the earlier
    /// object rather than failing.
    pub async fn upload(
        &self,
        token: &AccessToken,
        bucket: Bucket,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        if key.is_empty() || key.contains("..") || key.contains('/') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket.as_str(),
            key
        );
        debug!(bucket = bucket.as_str(), key = %key, "uploading object");

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token.as_str())
            .header("x-upsert", "true")
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::upload_failed(status.as_u16(), message));
        }
        Ok(())
    }

    /// Public URL for an uploaded object.
    pub fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket.as_str(),
            key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StorageClient {
        StorageClient::new(StorageConfig {
            url: "https://abc.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn public_url_has_the_fixed_form() {
        let url = client().public_url(Bucket::Resumes, "resume-12345-user_3");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/resumes/resume-12345-user_3"
        );

        let url = client().public_url(Bucket::CompanyLogo, "logo-1-Acme");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/company-logo/logo-1-Acme"
        );
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let err = client()
            .upload(
                &AccessToken::new("t"),
                Bucket::Resumes,
                "../secrets",
                vec![],
                "application/pdf",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
