//! Credential sources for the Discovery Engine API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::ImportError;

/// Token endpoint of the metadata server available on Cloud Run, Cloud
/// Functions and Compute Engine.
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Connect and request timeout of metadata server calls. Concurrent callers
/// wait on the token cache for at most this long.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Supplies OAuth2 bearer tokens for API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token valid for at least the next request.
    async fn token(&self) -> Result<String, ImportError>;
}

/// A fixed token, typically from `GOOGLE_OAUTH_ACCESS_TOKEN` during local runs.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String, ImportError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Fetches the runtime service account's token from the metadata server and
/// caches it until shortly before expiry.
pub struct MetadataServerToken {
    http: reqwest::Client,
    url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl MetadataServerToken {
    pub fn new() -> Result<Self, ImportError> {
        Self::with_url(METADATA_TOKEN_URL, METADATA_TIMEOUT)
    }

    /// Use a different token endpoint and timeout (tests).
    ///
    /// The token fetch gets its own HTTP client so its timeout does not
    /// apply to long-running API calls.
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, ImportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ImportError::config(format!("failed to build token client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
            cached: Mutex::new(None),
        })
    }

    async fn fetch(&self) -> Result<TokenResponse, ImportError> {
        let response = self
            .http
            .get(&self.url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| ImportError::auth(format!("metadata server unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::auth(format!(
                "metadata server returned {}: {}",
                status, body
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ImportError::auth(format!("invalid token response: {}", e)))
    }
}

#[async_trait]
impl TokenSource for MetadataServerToken {
    async fn token(&self) -> Result<String, ImportError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch().await?;
        let lifetime = Duration::from_secs(fresh.expires_in).saturating_sub(EXPIRY_MARGIN);
        debug!(expires_in = fresh.expires_in, "Fetched access token from metadata server");

        *cached = Some(CachedToken {
            value: fresh.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(fresh.access_token)
    }
}
