use craftdex_resolver::{EnabledCombinationResolver, ModCombinationResolver};
use craftdex_store::ContentStore;
use craftdex_types::{CombinationId, Dependency, Mod, ModCombination, ModId};
use std::sync::Arc;

fn insert_mod(store: &ContentStore, id: u64, name: &str, deps: Vec<Dependency>) {
    store
        .insert_mod(&Mod {
            id: ModId::new(id),
            name: name.to_string(),
            author: "author".to_string(),
            version: "1.0.0".to_string(),
            dependencies: deps,
        })
        .unwrap();
}

fn insert_combination(store: &ContentStore, base: u64, optional: &[u64]) -> CombinationId {
    let combination = ModCombination {
        id: CombinationId::new(),
        base_mod_id: ModId::new(base),
        base_mod_name: String::new(),
        optional_mod_ids: optional.iter().copied().map(ModId::new).collect(),
        has_items: true,
        has_recipes: true,
        has_icons: false,
        has_translations: false,
    };
    store.insert_combination(&combination).unwrap();
    combination.id
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ── Validity ─────────────────────────────────────────────────────

#[test]
fn combination_without_optionals_is_always_valid() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    insert_mod(&store, 1, "base", vec![]);
    let id = insert_combination(&store, 1, &[]);

    let resolver = ModCombinationResolver::new(store);
    assert_eq!(resolver.resolve(&names(&["base"])).unwrap(), vec![id]);
}

#[test]
fn combination_is_valid_only_when_all_optionals_enabled() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    insert_mod(&store, 1, "base", vec![]);
    insert_mod(&store, 2, "trains", vec![]);
    let plain = insert_combination(&store, 1, &[]);
    let trains_combo = insert_combination(&store, 2, &[]);
    let paired = insert_combination(&store, 2, &[1]);

    let resolver = ModCombinationResolver::new(store);

    // Both mods enabled: all three combinations valid.
    let both = resolver.resolve(&names(&["base", "trains"])).unwrap();
    assert_eq!(both.len(), 3);
    assert!(both.contains(&paired));

    // Removing "base" invalidates the paired combination.
    let only_trains = resolver.resolve(&names(&["trains"])).unwrap();
    assert_eq!(only_trains, vec![trains_combo]);
    assert!(!only_trains.contains(&paired));
    assert!(!only_trains.contains(&plain));
}

#[test]
fn empty_input_returns_empty_without_query() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    let resolver = ModCombinationResolver::new(store);
    assert!(resolver.resolve(&[]).unwrap().is_empty());
}

#[test]
fn unknown_mod_names_produce_no_combinations() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    insert_mod(&store, 1, "base", vec![]);
    insert_combination(&store, 1, &[]);

    let resolver = ModCombinationResolver::new(store);
    assert!(resolver.resolve(&names(&["phantom"])).unwrap().is_empty());
}

#[test]
fn result_is_sorted_for_determinism() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    insert_mod(&store, 1, "base", vec![]);
    let mut ids = vec![
        insert_combination(&store, 1, &[]),
        insert_combination(&store, 1, &[]),
        insert_combination(&store, 1, &[]),
    ];
    ids.sort();

    let resolver = ModCombinationResolver::new(store);
    assert_eq!(resolver.resolve(&names(&["base"])).unwrap(), ids);
}

// ── Composed resolution ──────────────────────────────────────────

#[test]
fn enabled_combinations_follow_mandatory_dependencies() {
    let store = Arc::new(ContentStore::open_in_memory().unwrap());
    insert_mod(&store, 1, "base", vec![]);
    insert_mod(&store, 2, "trains", vec![Dependency::mandatory("base")]);
    let base_combo = insert_combination(&store, 1, &[]);
    let paired = insert_combination(&store, 2, &[1]);

    let resolver = EnabledCombinationResolver::new(store);
    // Requesting only "trains" still pulls in base, validating the paired
    // combination.
    let ids = resolver
        .resolve_enabled_combinations(&names(&["trains"]))
        .unwrap();
    assert!(ids.contains(&base_combo));
    assert!(ids.contains(&paired));
}
