//! Dashboard and chart handlers

use super::types::{ApiError, ChartResponse, DashboardResponse, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use snippetlens_analytics::ServiceError;
use tracing::{error, info, warn};

/// Analytics dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Analytics",
    summary = "Dashboard summary",
    description = "Sample size, language distribution and sample titles. An empty or unreachable store still succeeds, with zero counts.",
    responses(
        (status = 200, description = "Dashboard assembled", body = DashboardResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    match state.service.dashboard().await {
        Ok(data) => Ok(Json(DashboardResponse {
            success: true,
            data,
        })),
        Err(e) => {
            error!("Error in analytics dashboard: {}", e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate analytics dashboard: {}", e),
            ))
        }
    }
}

/// Render a chart
#[utoipa::path(
    get,
    path = "/api/charts/{chart_type}",
    tag = "Analytics",
    summary = "Render a chart",
    description = "Render a chart as a base64-encoded PNG",
    params(
        ("chart_type" = String, Path, description = "Chart to render", example = "language-pie")
    ),
    responses(
        (status = 200, description = "Chart rendered", body = ChartResponse),
        (status = 400, description = "Unknown chart type", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(chart_type): Path<String>,
) -> Result<Json<ChartResponse>, ApiError> {
    info!("Chart requested: {}", chart_type);

    match state.service.chart(&chart_type).await {
        Ok(artifact) => Ok(Json(ChartResponse {
            success: true,
            chart_data: artifact.data,
            chart_type: artifact.kind,
            message: "Chart generated successfully!".to_string(),
        })),
        Err(e) => Err(chart_error(e)),
    }
}

fn chart_error(err: ServiceError) -> ApiError {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_client_error() {
        warn!("Rejected chart request: {}", err);
        ApiError::new(status, err.to_string())
    } else {
        error!("Error generating chart: {}", err);
        ApiError::new(status, format!("Failed to generate chart: {}", err))
    }
}
