//! Error types for registry lookups.

use propmock_core::CoreError;
use thiserror::Error;

/// Errors raised when looking up what a mock received.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Nothing was ever recorded under this test id.
    #[error("Element with testId \"{0}\" not found")]
    NotFound(String),

    /// The mock rendered, but without any props.
    #[error("Props not found for element with testId: {0}")]
    NoProps(String),

    /// The mock has no callable prop under this key.
    #[error("Mock function \"{key}\" not found for testId \"{test_id}\"")]
    FunctionNotFound { test_id: String, key: String },

    /// Encoding the props snapshot failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias used throughout propmock.
pub type Result<T> = std::result::Result<T, HarnessError>;
