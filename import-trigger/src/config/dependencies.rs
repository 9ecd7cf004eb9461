//! Dependency initialization and wiring for the import trigger.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::AppError;
use import_trigger_handler::TriggerHandler;
use import_trigger_repository::{
    DiscoveryEngineClient, DiscoveryEngineConfig, MetadataServerToken, StaticToken, TokenSource,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The handler serving every incoming event.
    pub handler: Arc<TriggerHandler>,
}

impl Dependencies {
    /// Build the Discovery Engine client and the handler on top of it.
    ///
    /// API calls share one HTTP connection pool for the lifetime of the
    /// process. Metadata server token fetches use their own pool with a short
    /// timeout.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let http = reqwest::Client::new();

        let mut config = DiscoveryEngineConfig::for_location(&settings.location)
            .with_poll_interval(settings.poll_interval, settings.max_poll_interval);
        if let Some(endpoint) = &settings.endpoint {
            config = config.with_endpoint(endpoint);
        }

        let tokens: Arc<dyn TokenSource> = match &settings.access_token {
            Some(token) => Arc::new(StaticToken::new(token)),
            None => Arc::new(MetadataServerToken::new()?),
        };

        info!(
            project_id = %settings.project_id,
            location = %settings.location,
            data_store_id = %settings.data_store_id,
            endpoint = %config.endpoint,
            static_token = settings.access_token.is_some(),
            "Initializing dependencies"
        );

        let client = DiscoveryEngineClient::with_http_client(http, config, tokens)?;
        let handler = TriggerHandler::new(Arc::new(client), settings.branch());

        Ok(Self {
            handler: Arc::new(handler),
        })
    }
}
