//! In-memory document store
//!
//! Keeps documents per collection in insertion order. Used by tests and by
//! the `memory://` store URL for demos.

use async_trait::async_trait;
use serde_json::Value;
use snippetlens_core::{DocumentStore, GroupCount, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    reachable: bool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            reachable: true,
        }
    }

    /// A store whose every operation fails, as if the server went away
    /// after the client was created
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    pub async fn insert(&self, collection: &str, document: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    pub async fn insert_many<I>(&self, collection: &str, documents: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.to_string()).or_default();
        entries.extend(documents);
        debug!(
            "Collection '{}' now holds {} documents",
            collection,
            entries.len()
        );
    }

    fn check_reachable(&self, operation: &str) -> StoreResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(StoreError::query(operation, "connection refused"))
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Group key for a field value; missing and null share one group
fn group_key(value: Option<&Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(other.clone()),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>> {
        self.check_reachable("find")?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn group_count(&self, collection: &str, field: &str) -> StoreResult<Vec<GroupCount>> {
        self.check_reachable("aggregate")?;
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        // First-seen order is kept for groups with equal counts
        let mut groups: Vec<GroupCount> = Vec::new();
        for doc in docs {
            let key = group_key(doc.get(field));
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.count += 1,
                None => groups.push(GroupCount { key, count: 1 }),
            }
        }

        groups.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(groups)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_reachable("ping")
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
