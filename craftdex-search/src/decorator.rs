//! Hydration of ranked results into API-ready entities.

use crate::error::SearchOpResult;
use crate::result::{EntityType, SearchResult};
use craftdex_store::ContentStore;
use craftdex_types::{ItemId, RecipeData, RecipeDataCollection, RecipeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A fully hydrated, client-facing search hit.
///
/// `entity_type` and `name` are empty strings when the underlying entity
/// vanished between query and decoration; the batch never fails for that.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DecoratedEntity {
    pub entity_type: String,
    pub name: String,
    /// The first name-groups of the result's recipes, flattened.
    pub recipes: Vec<RecipeData>,
    /// Distinct recipe-name count before slicing, so clients can offer
    /// "show more" without a second search.
    pub total_recipes: usize,
}

/// Turns raw ranked results into decorated entities with bounded per-result
/// recipe lists.
pub struct SearchDecorator {
    store: Arc<ContentStore>,
}

impl SearchDecorator {
    /// Creates a decorator over the given content store.
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Hydrates `results` in their given order.
    ///
    /// All item ids and recipe ids across the whole batch are collected
    /// first and fetched with one store call per entity kind.
    pub fn decorate(
        &self,
        results: &[SearchResult],
        recipes_per_result: usize,
    ) -> SearchOpResult<Vec<DecoratedEntity>> {
        let mut item_ids: Vec<ItemId> = Vec::new();
        let mut recipe_ids: Vec<RecipeId> = Vec::new();
        for result in results {
            match result.entity_type {
                EntityType::Item => item_ids.push(ItemId::new(result.id)),
                EntityType::Recipe => recipe_ids.push(RecipeId::new(result.id)),
            }
            recipe_ids.extend(result.recipe_ids());
        }
        item_ids.sort();
        item_ids.dedup();
        recipe_ids.sort();
        recipe_ids.dedup();

        let items = self.store.items_by_ids(&item_ids)?;
        let recipes = self.store.recipes_by_ids(&recipe_ids)?;
        debug!(
            results = results.len(),
            items = items.len(),
            recipes = recipes.len(),
            "hydrated search batch"
        );

        Ok(results
            .iter()
            .map(|result| decorate_one(result, &items, &recipes, recipes_per_result))
            .collect())
    }
}

fn decorate_one(
    result: &SearchResult,
    items: &HashMap<ItemId, craftdex_store::ItemData>,
    recipes: &HashMap<RecipeId, RecipeData>,
    recipes_per_result: usize,
) -> DecoratedEntity {
    let (entity_type, name) = match result.entity_type {
        EntityType::Item => match items.get(&ItemId::new(result.id)) {
            Some(item) => (EntityType::Item.to_string(), item.name.clone()),
            None => (String::new(), String::new()),
        },
        EntityType::Recipe => match recipes.get(&RecipeId::new(result.id)) {
            Some(recipe) => (EntityType::Recipe.to_string(), recipe.name.clone()),
            None => (String::new(), String::new()),
        },
    };

    // Grouped ids flatten in group order; vanished recipes are soft misses.
    let collection: RecipeDataCollection = result
        .recipe_ids()
        .iter()
        .filter_map(|id| recipes.get(id).cloned())
        .collect();

    let total_recipes = collection.count_names();
    let recipes = collection
        .limit_names(recipes_per_result, 0)
        .values()
        .to_vec();

    DecoratedEntity {
        entity_type,
        name,
        recipes,
        total_recipes,
    }
}
