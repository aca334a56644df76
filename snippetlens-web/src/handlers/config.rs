//! Configuration handlers

use super::types::ConfigResponse;
use crate::AppState;
use axum::{extract::State, response::Json};
use snippetlens_analytics::SNIPPET_SAMPLE_LIMIT;

/// Get server configuration
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "Configuration",
    summary = "Get server configuration",
    description = "Get the non-secret runtime configuration",
    responses(
        (status = 200, description = "Configuration retrieved successfully", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let client = state.service.repository().client();
    Json(ConfigResponse {
        host: state.config.host.clone(),
        port: state.config.port,
        store_backend: client
            .store()
            .ok()
            .map(|store| store.backend_name().to_string()),
        database: client.database().to_string(),
        sample_limit: SNIPPET_SAMPLE_LIMIT,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
