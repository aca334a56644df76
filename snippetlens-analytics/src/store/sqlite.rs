//! SQLite-backed document store
//!
//! Documents are stored as JSON text in a single `documents` table keyed by
//! collection name. Grouping runs through SQLite's JSON1 functions.

use async_trait::async_trait;
use serde_json::Value;
use snippetlens_core::{DocumentStore, GroupCount, StoreError, StoreResult};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) the database at `database_url`
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        info!("Connecting to SQLite document store: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::query("connect", e))?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so those must share a single connection.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::query("connect", e))?;

        let store = Self { pool };
        store.create_tables().await?;
        info!("SQLite document store ready");
        Ok(store)
    }

    async fn create_tables(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                body TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::query("create documents table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::query("create documents index", e))?;

        Ok(())
    }

    /// Seed a document. Not part of [`DocumentStore`]: the analytics
    /// surface never writes.
    pub async fn insert(&self, collection: &str, document: &Value) -> StoreResult<()> {
        let body =
            serde_json::to_string(document).map_err(|e| StoreError::Decode(e.to_string()))?;
        sqlx::query("INSERT INTO documents (collection, body) VALUES (?1, ?2)")
            .bind(collection)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::query("insert", e))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Rebuild a typed group key from `json_type` and the extracted text
fn decode_group_key(key_type: Option<&str>, text: Option<String>) -> StoreResult<Option<Value>> {
    let (Some(key_type), Some(text)) = (key_type, text) else {
        return Ok(None);
    };
    let key = match key_type {
        "text" => Value::String(text),
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))?,
    };
    Ok(Some(key))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT body FROM documents WHERE collection = ?1 ORDER BY id LIMIT ?2",
        )
        .bind(collection)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("find", e))?;

        rows.iter()
            .map(|row| {
                let body: String = row
                    .try_get("body")
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
            })
            .collect()
    }

    async fn group_count(&self, collection: &str, field: &str) -> StoreResult<Vec<GroupCount>> {
        let path = format!("$.\"{}\"", field.replace('"', "\"\""));
        debug!("Grouping collection '{}' by {}", collection, path);

        // Missing fields and JSON nulls both land in the NULL group. Values
        // group by JSON type as well, so 3 and "3" stay apart. Ties keep
        // first-seen order via MIN(id).
        let rows = sqlx::query(
            r#"
            SELECT NULLIF(json_type(body, ?2), 'null') AS key_type,
                   CAST(json_extract(body, ?2) AS TEXT) AS group_key,
                   COUNT(*) AS group_count,
                   MIN(id) AS first_id
            FROM documents
            WHERE collection = ?1
            GROUP BY key_type, group_key
            ORDER BY group_count DESC, first_id ASC
            "#,
        )
        .bind(collection)
        .bind(path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("aggregate", e))?;

        rows.iter()
            .map(|row| {
                let key_type: Option<String> = row
                    .try_get("key_type")
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                let text: Option<String> = row
                    .try_get("group_key")
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                let count: i64 = row
                    .try_get("group_count")
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                Ok(GroupCount {
                    key: decode_group_key(key_type.as_deref(), text)?,
                    count: u64::try_from(count).unwrap_or(0),
                })
            })
            .collect()
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::query("ping", e))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn memory_store() -> SqliteDocumentStore {
        SqliteDocumentStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_find_returns_documents_in_insertion_order() {
        let store = memory_store().await;
        for i in 0..5 {
            store
                .insert("snippets", &json!({ "title": format!("snippet {}", i) }))
                .await
                .unwrap();
        }
        store
            .insert("users", &json!({ "name": "someone" }))
            .await
            .unwrap();

        let docs = store.find("snippets", 3).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["title"], "snippet 0");
        assert_eq!(docs[2]["title"], "snippet 2");
    }

    #[tokio::test]
    async fn test_group_count_orders_by_count_then_first_seen() {
        let store = memory_store().await;
        let docs = [
            json!({ "programmingLanguage": "go" }),
            json!({ "programmingLanguage": "rust" }),
            json!({ "title": "untagged" }),
            json!({ "programmingLanguage": "rust" }),
            json!({ "programmingLanguage": null }),
            json!({ "programmingLanguage": "go" }),
            json!({ "programmingLanguage": "rust" }),
        ];
        for doc in &docs {
            store.insert("snippets", doc).await.unwrap();
        }

        let groups = store
            .group_count("snippets", "programmingLanguage")
            .await
            .unwrap();

        assert_eq!(
            groups,
            vec![
                GroupCount::new(Some("rust"), 3),
                GroupCount::new(Some("go"), 2),
                GroupCount::new(None::<String>, 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_group_count_separates_json_types() {
        let store = memory_store().await;
        let docs = [
            json!({ "programmingLanguage": 3 }),
            json!({ "programmingLanguage": "3" }),
            json!({ "programmingLanguage": true }),
            json!({ "programmingLanguage": "true" }),
            json!({ "programmingLanguage": "3" }),
            json!({ "programmingLanguage": "1" }),
        ];
        for doc in &docs {
            store.insert("snippets", doc).await.unwrap();
        }

        let groups = store
            .group_count("snippets", "programmingLanguage")
            .await
            .unwrap();

        assert_eq!(
            groups,
            vec![
                GroupCount::new(Some("3"), 2),
                GroupCount::new(Some(3), 1),
                GroupCount::new(Some(true), 1),
                GroupCount::new(Some("true"), 1),
                GroupCount::new(Some("1"), 1),
            ]
        );
    }

    #[test]
    fn test_decode_group_key_by_json_type() {
        let decode = |key_type: &str, text: &str| {
            decode_group_key(Some(key_type), Some(text.to_string()))
        };

        assert_eq!(decode("integer", "7").unwrap(), Some(json!(7)));
        assert_eq!(decode("real", "1.5").unwrap(), Some(json!(1.5)));
        assert_eq!(decode("array", "[1,2]").unwrap(), Some(json!([1, 2])));
        assert_eq!(decode("false", "0").unwrap(), Some(json!(false)));
        assert_eq!(decode_group_key(None, None).unwrap(), None);
        assert!(decode("object", "{").is_err());
    }

    #[tokio::test]
    async fn test_ping_and_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("snippets.db").display());

        let store = SqliteDocumentStore::connect(&url).await.unwrap();
        store.ping().await.unwrap();
        store
            .insert("snippets", &json!({ "title": "persisted" }))
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteDocumentStore::connect(&url).await.unwrap();
        let docs = reopened.find("snippets", 100).await.unwrap();
        assert_eq!(docs, vec![json!({ "title": "persisted" })]);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_query_error() {
        let store = memory_store().await;
        store.close().await;
        assert!(matches!(store.ping().await, Err(StoreError::Query { .. })));
    }
}
