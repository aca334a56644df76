//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type SnippetLensResult<T> = Result<T, SnippetLensError>;

/// Result of a document store operation
pub type StoreResult<T> = Result<T, StoreError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Failures talking to the document store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No connection to the store was ever established
    #[error("document store is not connected")]
    Disconnected,

    /// The store was reachable but the query failed
    #[error("{operation} failed: {message}")]
    Query { operation: String, message: String },

    /// The store answered with something we could not decode
    #[error("could not decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn query(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Query {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}

/// Main error type for process-level concerns (configuration, start-up)
#[derive(Error, Debug)]
pub enum SnippetLensError {
    #[error("Store error: {source}")]
    Store {
        #[source]
        source: StoreError,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },
}

impl SnippetLensError {
    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            SnippetLensError::Store { context, .. }
            | SnippetLensError::Config { context, .. }
            | SnippetLensError::Validation { context, .. } => context,
        }
    }

    /// Store outages come and go; everything else needs a fix
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SnippetLensError::Store {
                source: StoreError::Disconnected | StoreError::Query { .. },
                ..
            }
        )
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SnippetLensError::Config { .. } | SnippetLensError::Validation { .. } => {
                error!(
                    error_id = %self.context().error_id,
                    error = %self,
                    "Configuration or validation error"
                );
            }
            SnippetLensError::Store { .. } => {
                warn!(
                    error_id = %self.context().error_id,
                    error = %self,
                    "Store error (may be recoverable)"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! store_error {
    ($source:expr, $component:expr) => {
        $crate::SnippetLensError::Store {
            source: $source,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check that the document store is running"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::SnippetLensError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::SnippetLensError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}
