//! Error types for the cache store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache store.
///
/// Every variant is an expected, recoverable outcome of a public operation.
/// Eviction itself cannot fail and is never surfaced; a broken internal
/// invariant is a defect guarded by debug assertions, not an error value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key already present, insert-if-absent refused
    #[error("Key already exists: {0}")]
    AlreadyExists(String),

    /// A single key/value pair exceeds the total capacity, so no amount
    /// of eviction could make it fit
    #[error("Entry of {required} bytes exceeds cache capacity of {max_size} bytes")]
    Oversized { required: usize, max_size: usize },
}

// == Result Type Alias ==
/// Convenience Result type for the cache store.
pub type Result<T> = std::result::Result<T, CacheError>;
