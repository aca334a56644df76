//! Analytics response envelopes

use serde::{Deserialize, Serialize};
use snippetlens_core::{ChartKind, DashboardSummary};
use utoipa::ToSchema;

/// Successful dashboard response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: DashboardSummary,
}

/// Successful chart response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Base64-encoded PNG
    pub chart_data: String,
    pub chart_type: ChartKind,
    #[schema(example = "Chart generated successfully!")]
    pub message: String,
}
