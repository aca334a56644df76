//! Document store backends
//!
//! Implementations of [`snippetlens_core::DocumentStore`] plus the shared
//! [`StoreClient`] connection handle.

pub mod client;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use client::StoreClient;
pub use memory::MemoryDocumentStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDocumentStore;
