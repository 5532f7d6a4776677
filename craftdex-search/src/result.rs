//! The in-memory search result model and its ordered collection.

use craftdex_types::{ItemId, RecipeId, ResultPriority};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// The closed set of entity kinds a search can surface.
///
/// Declaration order gives the tie-break order used by [`ResultCollection::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Item,
    Recipe,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Recipe => write!(f, "recipe"),
        }
    }
}

/// A matched entity with its ranking data and grouped recipe ids.
///
/// Identity is `(entity_type, id)`; the collection guarantees at most one
/// entry per identity by merging duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entity_type: EntityType,
    pub id: u64,
    pub name: String,
    pub priority: ResultPriority,
    /// Recipe ids grouped by an arbitrary label (usually the recipe name).
    /// BTree containers keep iteration deterministic for slicing.
    pub recipe_groups: BTreeMap<String, BTreeSet<RecipeId>>,
}

impl SearchResult {
    /// Creates an item result.
    #[must_use]
    pub fn item(id: ItemId, name: impl Into<String>, priority: ResultPriority) -> Self {
        Self {
            entity_type: EntityType::Item,
            id: id.value(),
            name: name.into(),
            priority,
            recipe_groups: BTreeMap::new(),
        }
    }

    /// Creates a recipe result.
    #[must_use]
    pub fn recipe(id: RecipeId, name: impl Into<String>, priority: ResultPriority) -> Self {
        Self {
            entity_type: EntityType::Recipe,
            id: id.value(),
            name: name.into(),
            priority,
            recipe_groups: BTreeMap::new(),
        }
    }

    /// The identity of this result.
    #[must_use]
    pub fn key(&self) -> (EntityType, u64) {
        (self.entity_type, self.id)
    }

    /// Adds a recipe id under a group label. Re-adding is a no-op.
    pub fn add_recipe(&mut self, group: &str, id: RecipeId) {
        self.recipe_groups
            .entry(group.to_string())
            .or_default()
            .insert(id);
    }

    /// Merges another result with the same identity into this one:
    /// priority becomes the better (lower) tier, recipe groups are unioned
    /// with set semantics. Merging a result into itself changes nothing.
    pub fn merge(&mut self, other: &SearchResult) {
        self.priority = self.priority.min(other.priority);
        for (group, ids) in &other.recipe_groups {
            self.recipe_groups
                .entry(group.clone())
                .or_default()
                .extend(ids.iter().copied());
        }
    }

    /// All grouped recipe ids, flattened in group order, duplicates removed
    /// (a recipe appearing in two groups is yielded once, on first sight).
    #[must_use]
    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        let mut seen = BTreeSet::new();
        let mut ids = Vec::new();
        for group_ids in self.recipe_groups.values() {
            for id in group_ids {
                if seen.insert(*id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }
}

/// An ordered, deduplicated collection of search results.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    results: Vec<SearchResult>,
    index: HashMap<(EntityType, u64), usize>,
}

impl ResultCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result, merging it into the existing entry if the identity is
    /// already present.
    pub fn add(&mut self, result: SearchResult) {
        match self.index.get(&result.key()) {
            Some(&pos) => self.results[pos].merge(&result),
            None => {
                self.index.insert(result.key(), self.results.len());
                self.results.push(result);
            }
        }
    }

    /// The number of distinct results currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when the collection holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Sorts by `(priority asc, name asc, type asc)`, ties broken left to
    /// right.
    pub fn sort(&mut self) {
        self.results
            .sort_by(|a, b| (a.priority, &a.name, a.entity_type).cmp(&(b.priority, &b.name, b.entity_type)));
        self.reindex();
    }

    /// Drops everything past the first `max` results. Used to bound the
    /// cached result set.
    pub fn truncate(&mut self, max: usize) {
        if self.results.len() > max {
            self.results.truncate(max);
            self.reindex();
        }
    }

    /// Returns the slice `[offset, offset + limit)`; a `limit` of zero means
    /// everything from `offset` onwards.
    #[must_use]
    pub fn page(&self, limit: usize, offset: usize) -> &[SearchResult] {
        let start = offset.min(self.results.len());
        let end = if limit == 0 {
            self.results.len()
        } else {
            self.results.len().min(start.saturating_add(limit))
        };
        &self.results[start..end]
    }

    /// All results in current order.
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Consumes the collection, yielding the results in current order.
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }

    fn reindex(&mut self) {
        self.index = self
            .results
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.key(), pos))
            .collect();
    }
}

impl FromIterator<SearchResult> for ResultCollection {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        let mut collection = Self::new();
        for result in iter {
            collection.add(result);
        }
        collection
    }
}
