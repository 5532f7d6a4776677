//! SQLite storage layer for Craftdex.
//!
//! Two stores back the core:
//!
//! - [`ContentStore`] holds the read-mostly content dataset (mods, their
//!   dependency edges, combinations, items, recipes, localized labels) and
//!   answers the batched lookups the resolver, search, and decorator issue.
//! - [`SearchCacheStore`] holds previously computed search result id lists,
//!   keyed by `(combination_id, query_hash)`. It lives in its own database
//!   file so cache churn is isolated from the content dataset.
//!
//! Every lookup taking a list of names or ids is answered in a single query;
//! callers are expected to coalesce the ids they need before calling.

mod cache_store;
mod content_store;
mod error;

pub use cache_store::{CachedResultRow, SearchCacheStore};
pub use content_store::{ContentStore, ItemData, KeywordMatch, MatchedEntity};
pub use error::{StoreError, StoreResult};
