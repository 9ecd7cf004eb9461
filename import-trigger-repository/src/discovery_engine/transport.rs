//! Authenticated JSON transport shared by the client and pending operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use super::auth::TokenSource;
use crate::errors::ImportError;

/// Version prefix of every REST path.
const API_VERSION: &str = "v1";

#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    endpoint: String,
    tokens: Arc<dyn TokenSource>,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, endpoint: String, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            endpoint,
            tokens,
        }
    }

    /// Absolute URL of a resource path such as `projects/p/.../operations/o`.
    pub(crate) fn url(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.endpoint, API_VERSION, resource)
    }

    pub(crate) async fn post<B, T>(&self, resource: &str, body: &B) -> Result<T, ImportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.token().await?;
        let response = self
            .http
            .post(self.url(resource))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub(crate) async fn get<T>(&self, resource: &str) -> Result<T, ImportError>
    where
        T: DeserializeOwned,
    {
        let token = self.tokens.token().await?;
        let response = self
            .http
            .get(self.url(resource))
            .bearer_auth(token)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ImportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Discovery Engine request failed");
            return Err(ImportError::request(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ImportError::parse(e.to_string()))
    }
}
