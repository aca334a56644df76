//! Shared store connection handle

use super::MemoryDocumentStore;
use snippetlens_core::{store_error, DocumentStore, StoreConfig, StoreError, StoreResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Process-wide handle to the document store.
///
/// Created once at start-up and cloned into every repository. A client may be
/// *disconnected* when the store could not be reached at start-up; reads then
/// fail with [`StoreError::Disconnected`] and the health check reports it.
#[derive(Clone)]
pub struct StoreClient {
    store: Option<Arc<dyn DocumentStore>>,
    database: String,
}

impl StoreClient {
    /// Connect according to `config.url`.
    ///
    /// Never fails: an unreachable store or unsupported URL yields a
    /// disconnected client and a logged error.
    pub async fn connect(config: &StoreConfig) -> Self {
        match Self::open(&config.url).await {
            Ok(store) => {
                info!(
                    backend = store.backend_name(),
                    database = %config.database,
                    "Document store connected"
                );
                Self {
                    store: Some(store),
                    database: config.database.clone(),
                }
            }
            Err(e) => {
                store_error!(e, "store_client").log();
                Self::disconnected(&config.database)
            }
        }
    }

    async fn open(url: &str) -> StoreResult<Arc<dyn DocumentStore>> {
        if url.starts_with("memory:") {
            return Ok(Arc::new(MemoryDocumentStore::new()));
        }

        #[cfg(feature = "sqlite")]
        if url.starts_with("sqlite:") {
            let store = super::SqliteDocumentStore::connect(url).await?;
            return Ok(Arc::new(store));
        }

        warn!("Unsupported document store URL: {}", url);
        Err(StoreError::query(
            "connect",
            format!("unsupported store URL: {}", url),
        ))
    }

    /// Wrap an already constructed store
    pub fn with_store(store: Arc<dyn DocumentStore>, database: &str) -> Self {
        Self {
            store: Some(store),
            database: database.to_string(),
        }
    }

    /// A client that never established a connection
    pub fn disconnected(database: &str) -> Self {
        Self {
            store: None,
            database: database.to_string(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The underlying store, or [`StoreError::Disconnected`]
    pub fn store(&self) -> StoreResult<&Arc<dyn DocumentStore>> {
        self.store.as_ref().ok_or(StoreError::Disconnected)
    }

    /// Liveness probe against the store
    pub async fn ping(&self) -> StoreResult<()> {
        self.store()?.ping().await
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("database", &self.database)
            .field(
                "backend",
                &self.store.as_ref().map(|store| store.backend_name()),
            )
            .finish()
    }
}
