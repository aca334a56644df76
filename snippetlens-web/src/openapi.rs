//! OpenAPI document for the SnippetLens web server

use utoipa::OpenApi;

use crate::handlers::{ChartResponse, ConfigResponse, DashboardResponse, ErrorResponse};
use snippetlens_analytics::{DatabaseStatus, HealthReport, HealthStatus};
use snippetlens_core::{ChartKind, DashboardSummary, LanguageCount, LanguageDistribution};

/// Main OpenAPI document for the SnippetLens web server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SnippetLens Analytics API",
        version = "0.1.0",
        description = "Read-only analytics over a code snippet collection",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::get_dashboard,
        crate::handlers::get_chart,
        crate::handlers::get_config,
    ),
    components(
        schemas(
            HealthReport,
            HealthStatus,
            DatabaseStatus,
            DashboardResponse,
            DashboardSummary,
            LanguageDistribution,
            LanguageCount,
            ChartResponse,
            ChartKind,
            ConfigResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Analytics", description = "Dashboard and chart endpoints"),
        (name = "Configuration", description = "Server configuration"),
    )
)]
pub struct ApiDoc;

/// Get the OpenAPI document as JSON
pub fn get_openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
