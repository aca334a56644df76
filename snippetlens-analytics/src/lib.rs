//! SnippetLens Analytics - Read-only analytics over a snippet collection
//!
//! This crate builds on the data model in snippetlens-core and provides:
//!
//! - Document store backends and the shared [`StoreClient`] handle
//! - [`AnalyticsRepository`]: sampled snippet reads and the language distribution
//! - [`DistributionChartRenderer`]: deterministic PNG pie charts, base64-encoded
//! - [`DashboardAssembler`]: the dashboard summary payload
//! - [`AnalyticsService`]: the façade consumed by the web layer
//!
//! ## Failure policies
//!
//! Store reads degrade to empty results; the health check is the only place
//! store reachability is reported. Rendering failures and invalid chart
//! requests propagate as [`ServiceError`].

pub mod chart;
pub mod dashboard;
pub mod repository;
pub mod service;
pub mod store;

pub use chart::{pie_wedges, DistributionChartRenderer, PieWedge, RenderError, PALETTE};
pub use dashboard::{summarize, DashboardAssembler, EMPTY_STORE_MESSAGE};
pub use repository::{AnalyticsRepository, SNIPPETS_COLLECTION, SNIPPET_SAMPLE_LIMIT};
pub use service::{
    AnalyticsService, DatabaseStatus, HealthReport, HealthStatus, ServiceError, ServiceResult,
};
pub use store::{MemoryDocumentStore, StoreClient};
#[cfg(feature = "sqlite")]
pub use store::SqliteDocumentStore;
