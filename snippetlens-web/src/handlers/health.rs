//! Health check handlers

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use snippetlens_analytics::HealthReport;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check",
    description = "Report whether the document store is reachable",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthReport),
        (status = 503, description = "Store is disconnected or failed its probe", body = HealthReport)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.service.health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
