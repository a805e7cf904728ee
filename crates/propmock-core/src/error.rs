//! Error types for the JSON hand-off.
//!
//! The comparator and serializer are total and never return errors; only
//! conversions to and from JSON text can fail.

use thiserror::Error;

/// Errors raised while encoding serialized props to JSON or parsing fixtures.
#[derive(Error, Debug)]
pub enum CoreError {
    /// serde_json rejected the input text or failed to encode a value.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout propmock-core.
pub type Result<T> = std::result::Result<T, CoreError>;
