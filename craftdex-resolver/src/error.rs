//! Error types for resolution.

use thiserror::Error;

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur during resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A mandatory dependency chain loops back on itself. The dataset is
    /// malformed; surfaced as an internal error rather than recursed into.
    #[error("mandatory dependency cycle through mod '{0}'")]
    DependencyCycle(String),

    /// Storage failure, propagated unmodified.
    #[error(transparent)]
    Store(#[from] craftdex_store::StoreError),
}
