//! Shared application state

use crate::{WebConfig, WebResult};
use snippetlens_analytics::{AnalyticsService, StoreClient};
use std::sync::Arc;
use tracing::info;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Analytics service over the process-wide store client
    pub service: Arc<AnalyticsService>,
}

impl AppState {
    /// Connect to the configured store and build the analytics service.
    ///
    /// An unreachable store does not fail start-up; the health endpoint
    /// reports it instead.
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let client = StoreClient::connect(&config.store_config()).await;
        Self::with_client(config, client)
    }

    /// Build state over an existing store client
    pub fn with_client(config: WebConfig, client: StoreClient) -> WebResult<Self> {
        info!(
            database = client.database(),
            connected = client.is_connected(),
            "Initializing analytics service"
        );
        let service = AnalyticsService::from_client(client)?;

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }
}
