//! Core trait definitions

use crate::error::StoreResult;
use crate::types::json_kind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One bucket of a grouping aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    /// Group key with its JSON type intact, so `3` and `"3"` are different
    /// groups; `None` for documents where the field is missing or null
    pub key: Option<Value>,
    pub count: u64,
}

impl GroupCount {
    pub fn new(key: Option<impl Into<Value>>, count: u64) -> Self {
        Self {
            key: key.map(Into::into),
            count,
        }
    }

    /// Display label for the key.
    ///
    /// Strings are used as they are. Other values are qualified with their
    /// JSON type (`3 (number)`, `true (boolean)`) so they never read the
    /// same as a string key.
    pub fn label(&self) -> Option<String> {
        self.key.as_ref().map(|key| match key {
            Value::String(s) => s.clone(),
            other => format!("{} ({})", other, json_kind(other)),
        })
    }
}

/// Read-only view of a document store holding JSON-like documents in
/// named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return up to `limit` documents from `collection` in natural order
    async fn find(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>>;

    /// Group every document in `collection` by `field` and count each group.
    ///
    /// Results are sorted by count, largest first. Documents without the
    /// field form a single group with a `None` key.
    async fn group_count(&self, collection: &str, field: &str) -> StoreResult<Vec<GroupCount>>;

    /// Liveness probe
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_keep_types_apart() {
        let label = |key: Value| GroupCount::new(Some(key), 1).label();

        assert_eq!(label(json!("3")).as_deref(), Some("3"));
        assert_eq!(label(json!(3)).as_deref(), Some("3 (number)"));
        assert_eq!(label(json!(true)).as_deref(), Some("true (boolean)"));
        assert_eq!(label(json!(["a"])).as_deref(), Some(r#"["a"] (array)"#));
        assert_eq!(GroupCount::new(None::<Value>, 1).label(), None);
    }
}
