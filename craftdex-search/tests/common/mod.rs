//! Shared fixtures for search integration tests.

use craftdex_store::{ContentStore, ItemData, SearchCacheStore};
use craftdex_types::{CombinationId, ItemId, RecipeData, RecipeId, RecipeMode};
use std::sync::Arc;

pub fn item(id: u64, name: &str) -> ItemData {
    ItemData {
        id: ItemId::new(id),
        name: name.to_string(),
    }
}

pub fn recipe(id: u64, name: &str, mode: RecipeMode, item: Option<u64>) -> RecipeData {
    RecipeData {
        id: RecipeId::new(id),
        name: name.to_string(),
        mode,
        item_id: item.map(ItemId::new),
    }
}

/// A small furnace-themed dataset in one combination:
///
/// - items: `furnace` (exact-match bait), `stone-furnace`, `steel-furnace`
/// - recipes: both modes of `stone-furnace` producing the stone furnace,
///   and the item-less `fill-water-barrel`
/// - a German label for `steel-furnace` and an English one for `furnace`
pub fn furnace_fixture() -> (Arc<ContentStore>, Arc<SearchCacheStore>, CombinationId) {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    let cache = Arc::new(SearchCacheStore::open_in_memory().unwrap());
    let combination = CombinationId::new();

    store.insert_item(combination, &item(1, "furnace")).unwrap();
    store
        .insert_item(combination, &item(2, "stone-furnace"))
        .unwrap();
    store
        .insert_item(combination, &item(3, "steel-furnace"))
        .unwrap();

    store
        .insert_recipe(
            combination,
            &recipe(20, "stone-furnace", RecipeMode::Normal, Some(2)),
        )
        .unwrap();
    store
        .insert_recipe(
            combination,
            &recipe(21, "stone-furnace", RecipeMode::Expensive, Some(2)),
        )
        .unwrap();
    store
        .insert_recipe(
            combination,
            &recipe(30, "fill-water-barrel", RecipeMode::Normal, None),
        )
        .unwrap();

    store
        .insert_translation(combination, "item", 3, "de", "Stahlofen")
        .unwrap();
    store
        .insert_translation(combination, "item", 1, "en", "Furnace")
        .unwrap();

    (store, cache, combination)
}
