//! Search query parsing, ranking, caching, and hydration for Craftdex.
//!
//! The request path through this crate:
//!
//! 1. [`SearchQuery::parse`] normalizes the raw query and derives its
//!    identity hash.
//! 2. [`CachedSearchResultService`] probes the persistent cache for the
//!    `(combination, hash)` key.
//! 3. On a miss, [`SearchService`] scans the content store per keyword,
//!    merges hits into a [`ResultCollection`] with priority-based ranking,
//!    and persists the ranked list.
//! 4. The requested page is sliced and handed to [`SearchDecorator`], which
//!    hydrates ids into API-ready entities with one batched fetch per kind.
//!
//! HTTP marshaling, auth, and the combination update pipeline live outside
//! this workspace.

mod cached;
mod decorator;
mod error;
mod query;
mod result;
mod service;

pub use cached::{CachedSearchResultService, DEFAULT_MAX_CACHE_AGE};
pub use decorator::{DecoratedEntity, SearchDecorator};
pub use error::{SearchError, SearchOpResult};
pub use query::SearchQuery;
pub use result::{EntityType, ResultCollection, SearchResult};
pub use service::{SearchConfig, SearchPage, SearchService};
