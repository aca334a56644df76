//! End-to-end analytics pipeline tests over an on-disk SQLite store

#![cfg(feature = "sqlite")]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use snippetlens_analytics::{
    pie_wedges, AnalyticsRepository, AnalyticsService, DatabaseStatus, HealthStatus,
    MemoryDocumentStore, ServiceError, SqliteDocumentStore, StoreClient, EMPTY_STORE_MESSAGE,
    SNIPPETS_COLLECTION, SNIPPET_SAMPLE_LIMIT,
};
use snippetlens_core::{ChartKind, DocumentStore, GroupCount, LanguageCount, LANGUAGE_FIELD};
use std::sync::Arc;
use tempfile::TempDir;

async fn sqlite_store(dir: &TempDir) -> SqliteDocumentStore {
    let url = format!("sqlite://{}", dir.path().join("snippets.db").display());
    SqliteDocumentStore::connect(&url).await.unwrap()
}

async fn seed(store: &SqliteDocumentStore, language: Option<&str>, count: usize) {
    for i in 0..count {
        let doc = match language {
            Some(lang) => json!({ "title": format!("{} snippet {}", lang, i), "programmingLanguage": lang }),
            None => json!({ "title": format!("untagged snippet {}", i) }),
        };
        store.insert(SNIPPETS_COLLECTION, &doc).await.unwrap();
    }
}

#[tokio::test]
async fn test_dashboard_over_large_collection() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    seed(&store, Some("python"), 90).await;
    seed(&store, Some("rust"), 60).await;
    seed(&store, None, 10).await;

    let service =
        AnalyticsService::from_client(StoreClient::with_store(Arc::new(store), "code_snippets"))
            .unwrap();
    let summary = service.dashboard().await.unwrap();

    // Total follows the sample cap while the distribution sees everything
    assert_eq!(summary.total_snippets, SNIPPET_SAMPLE_LIMIT as u64);
    assert_eq!(summary.language_distribution.total(), 160);
    assert_eq!(
        summary.language_distribution.as_slice(),
        &[
            LanguageCount::new(Some("python"), 90),
            LanguageCount::new(Some("rust"), 60),
            LanguageCount::new(None::<String>, 10),
        ]
    );
    assert_eq!(summary.sample_titles.len(), 5);
    assert_eq!(summary.sample_titles[0], "python snippet 0");
    assert_eq!(summary.message, "Successfully loaded 100 snippets!");
}

#[tokio::test]
async fn test_distribution_is_sorted_and_sums_to_collection() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    seed(&store, Some("go"), 3).await;
    seed(&store, Some("c"), 7).await;
    seed(&store, None, 2).await;
    seed(&store, Some("zig"), 5).await;

    let service =
        AnalyticsService::from_client(StoreClient::with_store(Arc::new(store), "code_snippets"))
            .unwrap();
    let distribution = service.repository().fetch_language_distribution().await;

    assert_eq!(distribution.total(), 17);
    let counts: Vec<u64> = distribution.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, vec![7, 5, 3, 2]);
    assert!(distribution.iter().any(|entry| entry.language.is_none()));

    let wedges = pie_wedges(&distribution).unwrap();
    assert_eq!(wedges.last().unwrap().label, "Unknown");
}

#[tokio::test]
async fn test_chart_from_sqlite_store() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    seed(&store, Some("python"), 3).await;
    seed(&store, Some("go"), 1).await;

    let service =
        AnalyticsService::from_client(StoreClient::with_store(Arc::new(store), "code_snippets"))
            .unwrap();

    let first = service.chart("language-pie").await.unwrap();
    let second = service.chart("language-pie").await.unwrap();
    assert_eq!(first.kind, ChartKind::LanguagePie);
    assert_eq!(first.data, second.data);

    let png = STANDARD.decode(&first.data).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let wedges = pie_wedges(&service.repository().fetch_language_distribution().await).unwrap();
    let labels: Vec<_> = wedges.iter().map(|w| w.percentage_label.as_str()).collect();
    assert_eq!(labels, vec!["75.0%", "25.0%"]);
}

#[tokio::test]
async fn test_empty_database() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    let service =
        AnalyticsService::from_client(StoreClient::with_store(Arc::new(store), "code_snippets"))
            .unwrap();

    let health = service.health().await;
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.database, DatabaseStatus::Connected);

    let summary = service.dashboard().await.unwrap();
    assert_eq!(summary.total_snippets, 0);
    assert_eq!(summary.message, EMPTY_STORE_MESSAGE);
}

#[tokio::test]
async fn test_closed_store_degrades_but_health_reports_it() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    seed(&store, Some("rust"), 4).await;
    store.close().await;

    let service =
        AnalyticsService::from_client(StoreClient::with_store(Arc::new(store), "code_snippets"))
            .unwrap();

    let summary = service.dashboard().await.unwrap();
    assert_eq!(summary.total_snippets, 0);

    let health = service.health().await;
    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert!(health.error.is_some());
}

#[tokio::test]
async fn test_invalid_chart_type_never_touches_store() {
    let service =
        AnalyticsService::from_client(StoreClient::disconnected("code_snippets")).unwrap();
    let err = service.chart("bogus").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidChartType { .. }));
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_backends_agree_on_mixed_type_languages() {
    let docs = vec![
        json!({ "programmingLanguage": 3 }),
        json!({ "programmingLanguage": "3" }),
        json!({ "programmingLanguage": true }),
        json!({ "programmingLanguage": "true" }),
        json!({ "programmingLanguage": "1" }),
        json!({ "programmingLanguage": "3" }),
        json!({ "programmingLanguage": 1.5 }),
        json!({ "programmingLanguage": null }),
        json!({ "title": "untagged" }),
    ];

    let dir = TempDir::new().unwrap();
    let sqlite = sqlite_store(&dir).await;
    for doc in &docs {
        sqlite.insert(SNIPPETS_COLLECTION, doc).await.unwrap();
    }
    let memory = MemoryDocumentStore::new();
    memory.insert_many(SNIPPETS_COLLECTION, docs).await;

    let from_sqlite = sqlite
        .group_count(SNIPPETS_COLLECTION, LANGUAGE_FIELD)
        .await
        .unwrap();
    let from_memory = memory
        .group_count(SNIPPETS_COLLECTION, LANGUAGE_FIELD)
        .await
        .unwrap();

    assert_eq!(
        from_sqlite,
        vec![
            GroupCount::new(Some("3"), 2),
            GroupCount::new(None::<String>, 2),
            GroupCount::new(Some(3), 1),
            GroupCount::new(Some(true), 1),
            GroupCount::new(Some("true"), 1),
            GroupCount::new(Some("1"), 1),
            GroupCount::new(Some(1.5), 1),
        ]
    );
    assert_eq!(from_sqlite, from_memory);

    let distribution = AnalyticsRepository::new(StoreClient::with_store(Arc::new(sqlite), "t"))
        .fetch_language_distribution()
        .await;
    assert_eq!(distribution.total(), 9);
    assert!(distribution
        .iter()
        .any(|entry| entry.language.as_deref() == Some("true (boolean)")));
}
