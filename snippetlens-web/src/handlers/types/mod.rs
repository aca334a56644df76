//! Request/response types used by the handlers

pub mod analytics;
pub mod common;

pub use analytics::*;
pub use common::*;
