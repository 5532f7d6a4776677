//! Error types for search.

use thiserror::Error;

/// Result type for search operations.
pub type SearchOpResult<T> = Result<T, SearchError>;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Storage failure, propagated unmodified.
    #[error(transparent)]
    Store(#[from] craftdex_store::StoreError),

    /// A cache payload could not be serialized for storage.
    #[error("cache serialization error: {0}")]
    CacheSerialization(#[from] serde_json::Error),
}
