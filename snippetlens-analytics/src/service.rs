//! Analytics service façade
//!
//! The single entry point the HTTP layer talks to. It owns the repository,
//! renderer and dashboard assembler and applies the two failure policies:
//! store reads degrade to empty results, while rendering failures and bad
//! chart requests surface as [`ServiceError`].

use crate::chart::{DistributionChartRenderer, RenderError};
use crate::dashboard::DashboardAssembler;
use crate::repository::AnalyticsRepository;
use crate::store::StoreClient;
use serde::{Deserialize, Serialize};
use snippetlens_core::{
    performance::measure_async, ChartArtifact, ChartKind, DashboardSummary, UnknownChartKind,
};
use thiserror::Error;
use tracing::{debug, error, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Name reported by the health check
pub const SERVICE_NAME: &str = "analytics-service";

pub const HEALTHY_MESSAGE: &str = "Analytics service is running properly!";
pub const DISCONNECTED_MESSAGE: &str =
    "Cannot connect to the document store. Make sure it is running.";
pub const HEALTH_CHECK_FAILED_MESSAGE: &str = "Health check failed";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid chart type. Use: {}", supported_chart_types())]
    InvalidChartType { requested: String },

    #[error("Chart rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidChartType { .. } => 400,
            ServiceError::Render(_) | ServiceError::Internal { .. } => 500,
        }
    }

    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}

impl From<UnknownChartKind> for ServiceError {
    fn from(err: UnknownChartKind) -> Self {
        ServiceError::InvalidChartType { requested: err.0 }
    }
}

fn supported_chart_types() -> String {
    ChartKind::ALL
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// Outcome of a health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthReport {
    pub status: HealthStatus,
    pub service: String,
    pub database: DatabaseStatus,
    pub message: String,
    /// Probe failure detail, present only when the probe itself failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    fn new(status: HealthStatus, database: DatabaseStatus, message: &str) -> Self {
        Self {
            status,
            service: SERVICE_NAME.to_string(),
            database,
            message: message.to_string(),
            error: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: AnalyticsRepository,
    renderer: DistributionChartRenderer,
    dashboard: DashboardAssembler,
}

impl AnalyticsService {
    pub fn new(repository: AnalyticsRepository, renderer: DistributionChartRenderer) -> Self {
        let dashboard = DashboardAssembler::new(repository.clone());
        Self {
            repository,
            renderer,
            dashboard,
        }
    }

    /// Build the service over a store client, loading the chart font
    pub fn from_client(client: StoreClient) -> Result<Self, RenderError> {
        let renderer = DistributionChartRenderer::new()?;
        Ok(Self::new(AnalyticsRepository::new(client), renderer))
    }

    pub fn repository(&self) -> &AnalyticsRepository {
        &self.repository
    }

    /// Report store reachability
    pub async fn health(&self) -> HealthReport {
        if !self.repository.client().is_connected() {
            return HealthReport::new(
                HealthStatus::Unhealthy,
                DatabaseStatus::Disconnected,
                DISCONNECTED_MESSAGE,
            );
        }

        match self.repository.ping().await {
            Ok(()) => HealthReport::new(
                HealthStatus::Healthy,
                DatabaseStatus::Connected,
                HEALTHY_MESSAGE,
            ),
            Err(e) => {
                error!("Store liveness probe failed: {}", e);
                let mut report = HealthReport::new(
                    HealthStatus::Unhealthy,
                    DatabaseStatus::Disconnected,
                    HEALTH_CHECK_FAILED_MESSAGE,
                );
                report.error = Some(e.to_string());
                report
            }
        }
    }

    /// Assemble the dashboard summary
    pub async fn dashboard(&self) -> ServiceResult<DashboardSummary> {
        let summary = measure_async("dashboard", self.dashboard.assemble()).await;
        info!(
            total_snippets = summary.total_snippets,
            languages = summary.language_distribution.len(),
            "Dashboard assembled"
        );
        Ok(summary)
    }

    /// Render the chart named by `chart_type`.
    ///
    /// The name is checked before anything is queried or drawn.
    pub async fn chart(&self, chart_type: &str) -> ServiceResult<ChartArtifact> {
        let kind: ChartKind = chart_type.parse()?;
        debug!("Generating chart: {}", kind);

        match kind {
            ChartKind::LanguagePie => {
                let distribution = self.repository.fetch_language_distribution().await;
                let renderer = self.renderer.clone();

                // Rasterising is CPU-bound; keep it off the async workers
                let artifact = tokio::task::spawn_blocking(move || {
                    renderer.render_language_pie(&distribution)
                })
                .await
                .map_err(|e| ServiceError::internal(format!("render task failed: {}", e)))??;

                Ok(artifact)
            }
        }
    }
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}
