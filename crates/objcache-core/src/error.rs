//! Error types for cache operations

use thiserror::Error;

/// Main error type for store and codec operations
///
/// The facade never surfaces these to callers; they are absorbed at the
/// backend adapter boundary and turned into `false` / `Miss` / `None`.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Backend connection failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Backend operation failed
    #[error("backend error: {0}")]
    Backend(String),

    /// Increment/decrement on a value that is not an integer
    #[error("value is not an integer: {0}")]
    NotNumeric(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
