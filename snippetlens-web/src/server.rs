//! SnippetLens web server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main SnippetLens web server
pub struct SnippetLensServer {
    config: WebConfig,
    state: AppState,
}

impl SnippetLensServer {
    /// Create a new server, connecting to the configured store
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> WebResult<()> {
        let local = listener.local_addr().map_err(WebError::Server)?;
        info!("Server listening on http://{}", local);
        info!("API docs at http://{}/swagger-ui", local);

        let app = create_app(self.state);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for SnippetLensServer
pub struct SnippetLensServerBuilder {
    config: WebConfig,
}

impl SnippetLensServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the document store URL
    pub fn store_url<S: Into<String>>(mut self, store_url: S) -> Self {
        self.config.store_url = store_url.into();
        self
    }

    /// Set the database name
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.config.database = database.into();
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<SnippetLensServer> {
        SnippetLensServer::new(self.config).await
    }
}

impl Default for SnippetLensServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
