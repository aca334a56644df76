//! Common types used across multiple handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Failure envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Invalid chart type. Use: language-pie")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// An error already mapped to its HTTP status
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Non-secret runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    #[schema(example = "127.0.0.1")]
    pub host: String,
    #[schema(example = 8080)]
    pub port: u16,
    /// Store backend in use, absent when disconnected
    #[schema(example = "sqlite")]
    pub store_backend: Option<String>,
    #[schema(example = "code_snippets")]
    pub database: String,
    #[schema(example = 100)]
    pub sample_limit: usize,
    #[schema(example = "0.1.0")]
    pub version: String,
}
