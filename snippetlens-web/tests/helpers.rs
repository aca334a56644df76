//! Integration test helpers
//!
//! Spawns the full application on a random port, backed by a store the test
//! controls.

#![allow(dead_code)]

use serde_json::Value;
use snippetlens_analytics::{MemoryDocumentStore, StoreClient, SNIPPETS_COLLECTION};
use snippetlens_web::{create_app, AppState, WebConfig};
use std::sync::{Arc, LazyLock};
use tokio::net::TcpListener;

// Make sure tracing is only initialised once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

/// A running test application
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self.get(path).await;
        let status = response.status();
        let body = response.json().await.expect("Response is not JSON");
        (status, body)
    }
}

/// In-memory store seeded with `docs` in the snippets collection
pub async fn memory_client(docs: Vec<Value>) -> StoreClient {
    let store = MemoryDocumentStore::new();
    store.insert_many(SNIPPETS_COLLECTION, docs).await;
    StoreClient::with_store(Arc::new(store), "code_snippets")
}

/// Application state over `client`
pub fn test_state(client: StoreClient) -> AppState {
    AppState::with_client(WebConfig::default(), client).expect("Failed to build state")
}

/// Serve the application over `client` on a random local port
pub async fn spawn_app(client: StoreClient) -> TestApp {
    LazyLock::force(&TRACING);

    let app = create_app(test_state(client));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        api_client: reqwest::Client::new(),
    }
}
