//! HTTP request handlers for the SnippetLens web server

pub mod analytics;
pub mod config;
pub mod health;
pub mod types;

pub use analytics::*;
pub use config::*;
pub use health::*;

// Re-export all types for convenience
pub use types::*;
