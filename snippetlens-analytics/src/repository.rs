//! Read-only access to the snippet collection
//!
//! Every public read degrades to an empty result when the store is
//! unavailable or a query fails. The `try_*` variants keep the failure so
//! callers (and tests) can tell "empty" from "failed".

use crate::store::StoreClient;
use snippetlens_core::{
    performance::measure_async, LanguageCount, LanguageDistribution, SnippetDocument, StoreError,
    StoreResult, LANGUAGE_FIELD,
};
use tracing::{debug, warn};

/// Collection holding snippet documents
pub const SNIPPETS_COLLECTION: &str = "snippets";

/// Maximum number of snippets returned by a single fetch
pub const SNIPPET_SAMPLE_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    client: StoreClient,
    collection: String,
}

impl AnalyticsRepository {
    pub fn new(client: StoreClient) -> Self {
        Self::with_collection(client, SNIPPETS_COLLECTION)
    }

    pub fn with_collection(client: StoreClient, collection: &str) -> Self {
        Self {
            client,
            collection: collection.to_string(),
        }
    }

    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    /// Up to [`SNIPPET_SAMPLE_LIMIT`] snippets in the store's natural order.
    ///
    /// Every fetched document is kept. Badly typed fields read as absent and
    /// are logged.
    pub async fn try_fetch_snippets(&self) -> StoreResult<Vec<SnippetDocument>> {
        let store = self.client.store()?;
        let raw = measure_async(
            "fetch_snippets",
            store.find(&self.collection, SNIPPET_SAMPLE_LIMIT),
        )
        .await?;

        let snippets: Vec<SnippetDocument> = raw
            .into_iter()
            .take(SNIPPET_SAMPLE_LIMIT)
            .enumerate()
            .map(|(position, value)| {
                let (snippet, issues) = SnippetDocument::from_value(value);
                for issue in &issues {
                    warn!(
                        collection = %self.collection,
                        position,
                        error = %issue,
                        "Ignoring malformed snippet field"
                    );
                }
                snippet
            })
            .collect();

        debug!("Fetched {} snippets", snippets.len());
        Ok(snippets)
    }

    /// Like [`Self::try_fetch_snippets`], but an unavailable store yields an
    /// empty list
    pub async fn fetch_snippets(&self) -> Vec<SnippetDocument> {
        self.try_fetch_snippets()
            .await
            .unwrap_or_else(|e| degrade("fetch_snippets", &e))
    }

    /// Snippet count per programming language over the whole collection.
    ///
    /// Snippets without a language are counted in a group of their own.
    /// Language values that are not strings keep their JSON type in the
    /// label, so `3` and `"3"` are counted apart.
    pub async fn try_fetch_language_distribution(&self) -> StoreResult<LanguageDistribution> {
        let store = self.client.store()?;
        let groups = measure_async(
            "fetch_language_distribution",
            store.group_count(&self.collection, LANGUAGE_FIELD),
        )
        .await?;

        let counts = groups
            .into_iter()
            .filter(|group| group.count > 0)
            .map(|group| LanguageCount {
                language: group.label(),
                count: group.count,
            })
            .collect();

        // Backends already sort; re-sorting (stably) keeps the ordering
        // guarantee independent of the backend.
        Ok(LanguageDistribution::from_counts(counts))
    }

    /// Like [`Self::try_fetch_language_distribution`], but an unavailable
    /// store yields an empty distribution
    pub async fn fetch_language_distribution(&self) -> LanguageDistribution {
        self.try_fetch_language_distribution()
            .await
            .unwrap_or_else(|e| degrade("fetch_language_distribution", &e))
    }

    /// Liveness probe for health reporting
    pub async fn ping(&self) -> StoreResult<()> {
        self.client.ping().await
    }
}

fn degrade<T: Default>(operation: &str, error: &StoreError) -> T {
    match error {
        StoreError::Disconnected => {
            debug!(operation, "Store not connected, returning empty result")
        }
        _ => warn!(operation, error = %error, "Store query failed, returning empty result"),
    }
    T::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;
    use std::sync::Arc;

    async fn repository_with(docs: Vec<serde_json::Value>) -> AnalyticsRepository {
        let store = MemoryDocumentStore::new();
        store.insert_many(SNIPPETS_COLLECTION, docs).await;
        AnalyticsRepository::new(StoreClient::with_store(Arc::new(store), "test"))
    }

    #[tokio::test]
    async fn test_fetch_snippets_is_capped() {
        let docs = (0..250)
            .map(|i| json!({ "title": format!("snippet {}", i), "programmingLanguage": "rust" }))
            .collect();
        let repository = repository_with(docs).await;

        let snippets = repository.fetch_snippets().await;
        assert_eq!(snippets.len(), SNIPPET_SAMPLE_LIMIT);
        assert_eq!(snippets[0].title.as_deref(), Some("snippet 0"));
        assert_eq!(snippets[99].title.as_deref(), Some("snippet 99"));
    }

    #[tokio::test]
    async fn test_malformed_documents_are_kept_untitled() {
        let repository = repository_with(vec![
            json!({ "title": "ok" }),
            json!("just a string"),
            json!({ "title": 12, "programmingLanguage": "go" }),
            json!({ "title": "also ok" }),
        ])
        .await;

        let snippets = repository.try_fetch_snippets().await.unwrap();
        let titles: Vec<_> = snippets.iter().map(|s| s.display_title()).collect();
        assert_eq!(titles, vec!["ok", "Untitled", "Untitled", "also ok"]);
        assert_eq!(snippets[2].programming_language.as_deref(), Some("go"));
    }

    #[tokio::test]
    async fn test_non_string_languages_get_typed_labels() {
        let repository = repository_with(vec![
            json!({ "programmingLanguage": "3" }),
            json!({ "programmingLanguage": 3 }),
            json!({ "programmingLanguage": true }),
            json!({ "programmingLanguage": "true" }),
            json!({ "programmingLanguage": "3" }),
        ])
        .await;

        let distribution = repository.fetch_language_distribution().await;
        assert_eq!(
            distribution.as_slice(),
            &[
                LanguageCount::new(Some("3"), 2),
                LanguageCount::new(Some("3 (number)"), 1),
                LanguageCount::new(Some("true (boolean)"), 1),
                LanguageCount::new(Some("true"), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_distribution_covers_whole_collection() {
        let mut docs: Vec<_> = (0..150)
            .map(|_| json!({ "programmingLanguage": "python" }))
            .collect();
        docs.extend((0..30).map(|_| json!({ "programmingLanguage": "go" })));
        docs.extend((0..5).map(|_| json!({ "title": "untagged" })));
        let repository = repository_with(docs).await;

        let distribution = repository.fetch_language_distribution().await;
        assert_eq!(distribution.total(), 185);
        assert_eq!(
            distribution.as_slice(),
            &[
                LanguageCount::new(Some("python"), 150),
                LanguageCount::new(Some("go"), 30),
                LanguageCount::new(None::<String>, 5),
            ]
        );
    }

    #[tokio::test]
    async fn test_disconnected_client_degrades_to_empty() {
        let repository = AnalyticsRepository::new(StoreClient::disconnected("test"));

        assert!(repository.fetch_snippets().await.is_empty());
        assert!(repository.fetch_language_distribution().await.is_empty());
        assert_eq!(
            repository.try_fetch_snippets().await,
            Err(StoreError::Disconnected)
        );
    }

    #[tokio::test]
    async fn test_query_failure_is_distinguishable_from_empty() {
        let failing = AnalyticsRepository::new(StoreClient::with_store(
            Arc::new(MemoryDocumentStore::unreachable()),
            "test",
        ));
        let empty = repository_with(Vec::new()).await;

        assert!(matches!(
            failing.try_fetch_language_distribution().await,
            Err(StoreError::Query { .. })
        ));
        assert_eq!(
            empty.try_fetch_language_distribution().await,
            Ok(LanguageDistribution::empty())
        );

        // Both look the same through the public contract
        assert_eq!(
            failing.fetch_language_distribution().await,
            empty.fetch_language_distribution().await
        );
    }
}
