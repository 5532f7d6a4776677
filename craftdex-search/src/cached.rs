//! The persistent cache of computed search results.

use crate::SearchQuery;
use crate::error::SearchOpResult;
use crate::result::SearchResult;
use craftdex_store::SearchCacheStore;
use craftdex_types::CombinationId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default maximum age of a cached result before cleanup removes it.
pub const DEFAULT_MAX_CACHE_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Caches ranked result lists keyed by `(combination_id, query_hash)`.
///
/// Writes are last-write-wins; two requests racing to store the same key is
/// harmless because the list is deterministic for the key. Unreadable
/// payloads (e.g. after a format change) count as misses, never as errors.
pub struct CachedSearchResultService {
    store: Arc<SearchCacheStore>,
    max_age: Duration,
}

impl CachedSearchResultService {
    /// Creates a cache service with the default max age.
    pub fn new(store: Arc<SearchCacheStore>) -> Self {
        Self::with_max_age(store, DEFAULT_MAX_CACHE_AGE)
    }

    /// Creates a cache service with an explicit max age.
    pub fn with_max_age(store: Arc<SearchCacheStore>, max_age: Duration) -> Self {
        Self { store, max_age }
    }

    /// Returns the cached ranked results for the query, if present.
    pub fn fetch(
        &self,
        combination_id: CombinationId,
        query: &SearchQuery,
    ) -> SearchOpResult<Option<Vec<SearchResult>>> {
        let Some(payload) = self.store.fetch(combination_id, query.hash())? else {
            debug!(%combination_id, hash = query.hash(), "search cache miss");
            return Ok(None);
        };
        match serde_json::from_str::<Vec<SearchResult>>(&payload) {
            Ok(results) => {
                debug!(
                    %combination_id,
                    hash = query.hash(),
                    results = results.len(),
                    "search cache hit"
                );
                Ok(Some(results))
            }
            Err(e) => {
                warn!(%combination_id, hash = query.hash(), "unreadable cache payload: {e}");
                Ok(None)
            }
        }
    }

    /// Stores the ranked results for the query, overwriting any previous
    /// entry for the same key.
    pub fn persist(
        &self,
        combination_id: CombinationId,
        query: &SearchQuery,
        results: &[SearchResult],
    ) -> SearchOpResult<()> {
        let payload = serde_json::to_string(results)?;
        self.store.persist(combination_id, query.hash(), &payload)?;
        Ok(())
    }

    /// Removes entries older than the configured max age. Returns the number
    /// removed. Meant for a periodic maintenance task.
    pub fn cleanup(&self) -> SearchOpResult<usize> {
        Ok(self.store.cleanup(self.max_age)?)
    }

    /// Removes every cached entry. Used for forced invalidation after the
    /// underlying dataset changes.
    pub fn clear(&self) -> SearchOpResult<usize> {
        Ok(self.store.clear()?)
    }
}
