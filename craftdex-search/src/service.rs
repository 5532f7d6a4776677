//! The search facade the API layer calls.

use crate::cached::CachedSearchResultService;
use crate::decorator::{DecoratedEntity, SearchDecorator};
use crate::error::SearchOpResult;
use crate::query::SearchQuery;
use crate::result::{ResultCollection, SearchResult};
use craftdex_store::{ContentStore, KeywordMatch, MatchedEntity, SearchCacheStore};
use craftdex_types::{CombinationId, ResultPriority};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Tunables for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Locale whose label hits rank as secondary when the requested locale
    /// missed.
    pub fallback_locale: String,
    /// Upper bound on the number of ranked results kept (and cached) per
    /// query.
    pub max_results: usize,
    /// Maximum age of cached results before `cleanup_cache` removes them.
    pub cache_max_age: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fallback_locale: "en".to_string(),
            max_results: 1000,
            cache_max_age: crate::cached::DEFAULT_MAX_CACHE_AGE,
        }
    }
}

/// A page of decorated search hits plus the total result count.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub entities: Vec<DecoratedEntity>,
    pub total: usize,
}

/// Executes free-text searches against one enabled combination.
///
/// Per request: parse the query, probe the cache, on miss scan the store per
/// keyword and merge into a ranked collection, persist, then slice and
/// decorate the requested page.
pub struct SearchService {
    store: Arc<ContentStore>,
    cache: CachedSearchResultService,
    decorator: SearchDecorator,
    config: SearchConfig,
}

impl SearchService {
    /// Creates a search service over the given stores.
    pub fn new(
        store: Arc<ContentStore>,
        cache_store: Arc<SearchCacheStore>,
        config: SearchConfig,
    ) -> Self {
        let cache = CachedSearchResultService::with_max_age(cache_store, config.cache_max_age);
        let decorator = SearchDecorator::new(Arc::clone(&store));
        Self {
            store,
            cache,
            decorator,
            config,
        }
    }

    /// Searches the combination and returns the decorated page
    /// `[offset, offset + limit)` along with the total number of results.
    pub fn search(
        &self,
        combination_id: CombinationId,
        locale: &str,
        raw_query: &str,
        offset: usize,
        limit: usize,
        recipes_per_result: usize,
    ) -> SearchOpResult<SearchPage> {
        let query = SearchQuery::parse(raw_query);
        if query.is_empty() {
            return Ok(SearchPage {
                entities: Vec::new(),
                total: 0,
            });
        }

        let results = match self.cache.fetch(combination_id, &query)? {
            Some(results) => results,
            None => {
                let results = self.execute(combination_id, locale, &query)?;
                self.cache.persist(combination_id, &query, &results)?;
                results
            }
        };

        let total = results.len();
        let collection: ResultCollection = results.into_iter().collect();
        let page = collection.page(limit, offset);
        let entities = self.decorator.decorate(page, recipes_per_result)?;

        debug!(
            %combination_id,
            query = raw_query,
            total,
            page = entities.len(),
            "search served"
        );
        Ok(SearchPage { entities, total })
    }

    /// Scans the store per keyword and merges the hits into a ranked,
    /// sorted, bounded result list.
    fn execute(
        &self,
        combination_id: CombinationId,
        locale: &str,
        query: &SearchQuery,
    ) -> SearchOpResult<Vec<SearchResult>> {
        let mut collection = ResultCollection::new();
        for keyword in query.keywords() {
            for hit in self.store.match_items(combination_id, keyword)? {
                collection.add(self.result_for(&hit, keyword, locale));
            }
            for hit in self.store.match_recipes(combination_id, keyword)? {
                collection.add(self.result_for(&hit, keyword, locale));
            }
        }
        collection.sort();
        collection.truncate(self.config.max_results);

        debug!(
            %combination_id,
            hash = query.hash(),
            results = collection.len(),
            "search executed"
        );
        Ok(collection.into_results())
    }

    fn result_for(&self, hit: &KeywordMatch, keyword: &str, locale: &str) -> SearchResult {
        let priority = self.priority_for(hit, keyword, locale);
        match &hit.entity {
            MatchedEntity::Item(id) => SearchResult::item(*id, hit.name.clone(), priority),
            MatchedEntity::Recipe {
                id,
                item_id: Some(item_id),
                item_name,
            } => {
                // A recipe with a known product surfaces as that item, with
                // the recipe attached under its name group.
                let mut result = SearchResult::item(
                    *item_id,
                    item_name.clone().unwrap_or_default(),
                    priority,
                );
                result.add_recipe(&hit.name, *id);
                result
            }
            MatchedEntity::Recipe {
                id, item_id: None, ..
            } => {
                let mut result = SearchResult::recipe(*id, hit.name.clone(), priority);
                result.add_recipe(&hit.name, *id);
                result
            }
        }
    }

    /// Maps how a keyword hit to its ranking tier: exact internal name,
    /// requested locale label, fallback locale label, anything else.
    fn priority_for(&self, hit: &KeywordMatch, keyword: &str, locale: &str) -> ResultPriority {
        match &hit.locale {
            None if hit.name == keyword => ResultPriority::ExactMatch,
            None => ResultPriority::AnyMatch,
            Some(hit_locale) if hit_locale == locale => ResultPriority::PrimaryLocaleMatch,
            Some(hit_locale) if *hit_locale == self.config.fallback_locale => {
                ResultPriority::SecondaryLocaleMatch
            }
            Some(_) => ResultPriority::AnyMatch,
        }
    }

    /// Removes every cached search result. Administrative operation, invoked
    /// after the underlying dataset changes.
    pub fn clear_cache(&self) -> SearchOpResult<usize> {
        let removed = self.cache.clear()?;
        info!(removed, "search cache invalidated");
        Ok(removed)
    }

    /// Removes cached results past their max age. Administrative operation
    /// for periodic maintenance.
    pub fn cleanup_cache(&self) -> SearchOpResult<usize> {
        self.cache.cleanup()
    }
}
