//! Discovery Engine client implementation.
//!
//! This module provides the concrete implementation of `IndexingService`
//! on top of the Discovery Engine `v1` REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};
use url::Url;

use super::operation::{Operation, PendingOperation};
use super::transport::Transport;
use super::TokenSource;
use crate::config::DiscoveryEngineConfig;
use crate::errors::ImportError;
use crate::interfaces::{IndexingService, OperationHandle};
use import_trigger_shared::{DataSchema, ImportRequest, ReconciliationMode};

/// JSON body of `documents:import`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocumentsBody {
    gcs_source: GcsSource,
    reconciliation_mode: ReconciliationMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsSource {
    input_uris: Vec<String>,
    data_schema: DataSchema,
}

impl From<&ImportRequest> for ImportDocumentsBody {
    fn from(request: &ImportRequest) -> Self {
        Self {
            gcs_source: GcsSource {
                input_uris: request.source_uris(),
                data_schema: request.data_schema,
            },
            reconciliation_mode: request.reconciliation_mode,
        }
    }
}

/// Discovery Engine client.
///
/// # Example
///
/// ```ignore
/// let config = DiscoveryEngineConfig::for_location("global");
/// let tokens = Arc::new(MetadataServerToken::new()?);
/// let client = DiscoveryEngineClient::new(config, tokens)?;
///
/// let parent = BranchPath::new("proj1", "global", "ds1");
/// let request = ImportRequest::incremental(&parent, "gs://docs-bucket/report.pdf");
/// let operation = client.submit_import(&request).await?;
/// let outcome = operation.await_result().await?;
/// ```
pub struct DiscoveryEngineClient {
    transport: Transport,
    config: DiscoveryEngineConfig,
}

impl DiscoveryEngineClient {
    /// Create a new client with its own HTTP connection pool.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint and polling configuration
    /// * `tokens` - Source of bearer tokens for every call
    ///
    /// # Returns
    ///
    /// * `Ok(DiscoveryEngineClient)` - A new client instance
    /// * `Err(ImportError)` - If the endpoint is not a valid URL
    pub fn new(
        config: DiscoveryEngineConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ImportError> {
        Self::with_http_client(reqwest::Client::new(), config, tokens)
    }

    /// Create a new client sharing an existing HTTP connection pool.
    pub fn with_http_client(
        http: reqwest::Client,
        config: DiscoveryEngineConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ImportError> {
        Url::parse(&config.endpoint).map_err(|e| {
            ImportError::config(format!("invalid endpoint {}: {}", config.endpoint, e))
        })?;

        info!(endpoint = %config.endpoint, "Created Discovery Engine client");

        Ok(Self {
            transport: Transport::new(http, config.endpoint.clone(), tokens),
            config,
        })
    }
}

#[async_trait]
impl IndexingService for DiscoveryEngineClient {
    #[instrument(skip(self, request), fields(parent = %request.parent, locator = %request.source_locator))]
    async fn submit_import(
        &self,
        request: &ImportRequest,
    ) -> Result<Box<dyn OperationHandle>, ImportError> {
        let body = ImportDocumentsBody::from(request);
        let resource = format!("{}/documents:import", request.parent);

        let operation: Operation = self.transport.post(&resource, &body).await?;
        if operation.name.is_empty() {
            return Err(ImportError::parse("operation without a name"));
        }

        info!(operation = %operation.name, "Import operation started");

        Ok(Box::new(PendingOperation::new(
            self.transport.clone(),
            operation,
            self.config.poll_interval,
            self.config.max_poll_interval,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery_engine::StaticToken;
    use axum::extract::State;
    use axum::http::{HeaderMap, Method, StatusCode, Uri};
    use axum::response::{IntoResponse, Response};
    use axum::{Json, Router};
    use import_trigger_shared::BranchPath;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    const OPERATION: &str = "projects/p/locations/global/collections/default_collection/dataStores/ds/branches/0/operations/import-documents-42";

    /// Recorded call against the fake API.
    #[derive(Debug, Clone)]
    struct Call {
        method: Method,
        path: String,
        authorization: Option<String>,
        body: Value,
    }

    /// Behaviour of the fake API.
    #[derive(Clone, Copy)]
    enum Scenario {
        /// Operation completes after `n` polls.
        SucceedAfter(usize),
        /// The import call itself is rejected.
        RejectImport,
        /// Operation completes with an error status.
        OperationError,
        /// The import response already reports the operation as done.
        DoneOnImport,
        /// Metadata is reported while running; the final poll carries none.
        MetadataOnlyWhileRunning,
        /// Operation never completes.
        NeverDone,
    }

    struct FakeApi {
        scenario: Scenario,
        polls: AtomicUsize,
        calls: Mutex<Vec<Call>>,
    }

    async fn fake_api(
        State(api): State<Arc<FakeApi>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> Response {
        api.calls.lock().unwrap().push(Call {
            method: method.clone(),
            path: uri.path().to_string(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_str(&body).unwrap_or(Value::Null),
        });

        if method == Method::POST {
            return match api.scenario {
                Scenario::RejectImport => (
                    StatusCode::FORBIDDEN,
                    Json(json!({"error": {"code": 403, "message": "permission denied"}})),
                )
                    .into_response(),
                Scenario::DoneOnImport => Json(json!({
                    "name": OPERATION,
                    "done": true,
                    "metadata": {"successCount": "1"},
                    "response": {"errorSamples": []}
                }))
                .into_response(),
                _ => Json(json!({
                    "name": OPERATION,
                    "metadata": {"createTime": "2025-01-01T00:00:00Z"}
                }))
                .into_response(),
            };
        }

        let polls = api.polls.fetch_add(1, Ordering::SeqCst) + 1;
        match api.scenario {
            Scenario::SucceedAfter(n) if polls >= n => Json(json!({
                "name": OPERATION,
                "done": true,
                "metadata": {"successCount": "1", "totalCount": "1"},
                "response": {"errorSamples": []}
            }))
            .into_response(),
            Scenario::OperationError => Json(json!({
                "name": OPERATION,
                "done": true,
                "error": {"code": 7, "message": "caller lacks storage.objects.get"}
            }))
            .into_response(),
            Scenario::MetadataOnlyWhileRunning if polls == 1 => Json(json!({
                "name": OPERATION,
                "done": false,
                "metadata": {"successCount": "3", "totalCount": "3"}
            }))
            .into_response(),
            Scenario::MetadataOnlyWhileRunning => Json(json!({
                "name": OPERATION,
                "done": true,
                "response": {"errorSamples": []}
            }))
            .into_response(),
            _ => Json(json!({"name": OPERATION, "done": false})).into_response(),
        }
    }

    async fn spawn_fake_api(scenario: Scenario) -> (Arc<FakeApi>, DiscoveryEngineClient) {
        spawn_fake_api_polling(scenario, Duration::from_millis(1), Duration::from_millis(4)).await
    }

    async fn spawn_fake_api_polling(
        scenario: Scenario,
        poll_interval: Duration,
        max_poll_interval: Duration,
    ) -> (Arc<FakeApi>, DiscoveryEngineClient) {
        let api = Arc::new(FakeApi {
            scenario,
            polls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(fake_api).with_state(api.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config =
            DiscoveryEngineConfig::for_location("global").with_endpoint(format!("http://{}", addr));
        config.poll_interval = poll_interval;
        config.max_poll_interval = max_poll_interval;
        let client = DiscoveryEngineClient::new(config, Arc::new(StaticToken::new("test-token")))
            .unwrap();

        (api, client)
    }

    fn request() -> ImportRequest {
        ImportRequest::incremental(
            &BranchPath::new("p", "global", "ds"),
            "gs://docs-bucket/folder/report.pdf",
        )
    }

    #[test]
    fn test_import_body_shape() {
        let body = serde_json::to_value(ImportDocumentsBody::from(&request())).unwrap();
        assert_eq!(
            body,
            json!({
                "gcsSource": {
                    "inputUris": ["gs://docs-bucket/folder/report.pdf"],
                    "dataSchema": "content"
                },
                "reconciliationMode": "INCREMENTAL"
            })
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let config = DiscoveryEngineConfig::for_location("global").with_endpoint("not a url");
        let result = DiscoveryEngineClient::new(config, Arc::new(StaticToken::new("t")));
        assert!(matches!(result, Err(ImportError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_submit_and_wait() {
        let (api, client) = spawn_fake_api(Scenario::SucceedAfter(2)).await;

        let operation = client.submit_import(&request()).await.unwrap();
        assert_eq!(operation.name(), OPERATION);

        let outcome = operation.await_result().await.unwrap();
        assert_eq!(outcome.response, json!({"errorSamples": []}));
        assert_eq!(outcome.metadata["successCount"], "1");

        let calls = api.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 3);

        let import = &calls[0];
        assert_eq!(import.method, Method::POST);
        assert_eq!(
            import.path,
            "/v1/projects/p/locations/global/collections/default_collection/dataStores/ds/branches/default_branch/documents:import"
        );
        assert_eq!(import.authorization.as_deref(), Some("Bearer test-token"));
        assert_eq!(import.body["reconciliationMode"], "INCREMENTAL");

        for poll in &calls[1..] {
            assert_eq!(poll.method, Method::GET);
            assert_eq!(poll.path, format!("/v1/{}", OPERATION));
        }
    }

    #[tokio::test]
    async fn test_rejected_import() {
        let (api, client) = spawn_fake_api(Scenario::RejectImport).await;

        let err = client.submit_import(&request()).await.err().unwrap();
        match err {
            ImportError::RequestError { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("permission denied"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_operation() {
        let (_api, client) = spawn_fake_api(Scenario::OperationError).await;

        let operation = client.submit_import(&request()).await.unwrap();
        let err = operation.await_result().await.unwrap_err();

        match err {
            ImportError::OperationFailed { name, code, message } => {
                assert_eq!(name, OPERATION);
                assert_eq!(code, 7);
                assert!(message.contains("storage.objects.get"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_operation_done_on_import_is_not_polled() {
        let (api, client) = spawn_fake_api(Scenario::DoneOnImport).await;

        let operation = client.submit_import(&request()).await.unwrap();
        let outcome = operation.await_result().await.unwrap();

        assert_eq!(outcome.metadata["successCount"], "1");
        assert_eq!(outcome.response, json!({"errorSamples": []}));
        assert_eq!(api.polls.load(Ordering::SeqCst), 0);
        let calls = api.calls.lock().unwrap().clone();
        assert!(calls.iter().all(|call| call.method != Method::GET));
    }

    #[tokio::test]
    async fn test_metadata_kept_when_final_poll_omits_it() {
        let (api, client) = spawn_fake_api(Scenario::MetadataOnlyWhileRunning).await;

        let operation = client.submit_import(&request()).await.unwrap();
        let outcome = operation.await_result().await.unwrap();

        assert_eq!(api.polls.load(Ordering::SeqCst), 2);
        assert!(!outcome.metadata.is_null());
        assert_eq!(outcome.metadata["successCount"], "3");
        assert_eq!(outcome.response, json!({"errorSamples": []}));
    }

    #[tokio::test]
    async fn test_zero_poll_interval_still_backs_off() {
        let (api, client) = spawn_fake_api_polling(
            Scenario::NeverDone,
            Duration::ZERO,
            Duration::from_secs(30),
        )
        .await;

        let operation = client.submit_import(&request()).await.unwrap();
        let waited =
            tokio::time::timeout(Duration::from_millis(500), operation.await_result()).await;

        assert!(waited.is_err());
        // Doubling from 1ms allows about ten polls in 500ms.
        let polls = api.polls.load(Ordering::SeqCst);
        assert!(polls <= 12, "delay did not grow: {} polls", polls);
    }
}
