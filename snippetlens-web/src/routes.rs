//! Route definitions for the SnippetLens web server

use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analytics
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/charts/{chart_type}", get(handlers::get_chart))
        // Configuration
        .route("/config", get(handlers::get_config))
}
