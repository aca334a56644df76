//! SnippetLens Web Server
//!
//! HTTP surface for the snippet analytics service, built on Axum.

pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use server::SnippetLensServer;
pub use state::AppState;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    Router,
};
use snippetlens_core::{LoggingConfig, SnippetLensConfig, StoreConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    // Read-only API: any origin may GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    Router::new()
        // API routes
        .nest("/api", routes::api_routes())
        // OpenAPI document and explorer
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Document store URL (`sqlite://...` or `memory://`)
    pub store_url: String,
    /// Database name reported by the store client
    pub database: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_config(&SnippetLensConfig::default())
    }
}

impl WebConfig {
    /// Take the server and store sections of the application config
    pub fn from_config(config: &SnippetLensConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            store_url: config.store.url.clone(),
            database: config.store.database.clone(),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.store_url.clone(),
            database: self.database.clone(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Chart renderer unavailable: {0}")]
    Renderer(#[from] snippetlens_analytics::RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

/// Initialize logging for the web server
pub fn init_logging(logging: &LoggingConfig) -> WebResult<()> {
    let mut logging = logging.clone();
    if !logging
        .filter_directives
        .iter()
        .any(|directive| directive.starts_with("tower_http"))
    {
        logging.filter_directives.push("tower_http=debug".to_string());
    }

    snippetlens_core::init_logging(&logging)
        .map_err(|e| WebError::Config(format!("failed to initialise logging: {}", e)))
}
