use craftdex_store::{ContentStore, ItemData, MatchedEntity};
use craftdex_types::{
    CombinationId, Dependency, ItemId, Mod, ModCombination, ModId, RecipeData, RecipeId,
    RecipeMode,
};
use pretty_assertions::assert_eq;

fn module(id: u64, name: &str, deps: Vec<Dependency>) -> Mod {
    Mod {
        id: ModId::new(id),
        name: name.to_string(),
        author: "author".to_string(),
        version: "1.0.0".to_string(),
        dependencies: deps,
    }
}

fn combination(base_mod_id: u64, optional: &[u64]) -> ModCombination {
    ModCombination {
        id: CombinationId::new(),
        base_mod_id: ModId::new(base_mod_id),
        base_mod_name: String::new(),
        optional_mod_ids: optional.iter().copied().map(ModId::new).collect(),
        has_items: true,
        has_recipes: true,
        has_icons: false,
        has_translations: true,
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ── Mods ─────────────────────────────────────────────────────────

#[test]
fn mods_by_names_returns_requested_mods_with_dependencies() {
    let store = ContentStore::open_in_memory().unwrap();
    store
        .insert_mod(&module(
            1,
            "base",
            vec![],
        ))
        .unwrap();
    store
        .insert_mod(&module(
            2,
            "trains",
            vec![Dependency::mandatory("base"), Dependency::optional("signals")],
        ))
        .unwrap();

    let mods = store.mods_by_names(&names(&["trains", "base"])).unwrap();
    assert_eq!(mods.len(), 2);

    let trains = &mods["trains"];
    assert_eq!(trains.id, ModId::new(2));
    assert_eq!(trains.dependencies.len(), 2);
    assert_eq!(trains.dependencies[0], Dependency::mandatory("base"));
}

#[test]
fn mods_by_names_skips_unknown_names() {
    let store = ContentStore::open_in_memory().unwrap();
    store.insert_mod(&module(1, "base", vec![])).unwrap();

    let mods = store.mods_by_names(&names(&["base", "missing"])).unwrap();
    assert_eq!(mods.len(), 1);
    assert!(!mods.contains_key("missing"));
}

#[test]
fn mods_by_names_empty_input_is_empty() {
    let store = ContentStore::open_in_memory().unwrap();
    assert!(store.mods_by_names(&[]).unwrap().is_empty());
}

#[test]
fn insert_mod_replaces_dependency_edges() {
    let store = ContentStore::open_in_memory().unwrap();
    store
        .insert_mod(&module(1, "base", vec![Dependency::mandatory("old")]))
        .unwrap();
    store
        .insert_mod(&module(1, "base", vec![Dependency::mandatory("new")]))
        .unwrap();

    let mods = store.mods_by_names(&names(&["base"])).unwrap();
    assert_eq!(mods["base"].dependencies, vec![Dependency::mandatory("new")]);
}

// ── Combinations ─────────────────────────────────────────────────

#[test]
fn combinations_by_base_mod_names_joins_base_name() {
    let store = ContentStore::open_in_memory().unwrap();
    store.insert_mod(&module(1, "base", vec![])).unwrap();
    store.insert_mod(&module(2, "trains", vec![])).unwrap();

    let base_combo = combination(1, &[]);
    let trains_combo = combination(2, &[1]);
    store.insert_combination(&base_combo).unwrap();
    store.insert_combination(&trains_combo).unwrap();

    let found = store
        .combinations_by_base_mod_names(&names(&["trains"]))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, trains_combo.id);
    assert_eq!(found[0].base_mod_name, "trains");
    assert_eq!(found[0].optional_mod_ids, vec![ModId::new(1)]);
    assert!(found[0].has_items);
    assert!(!found[0].has_icons);
}

#[test]
fn combinations_by_base_mod_names_empty_input_is_empty() {
    let store = ContentStore::open_in_memory().unwrap();
    assert!(store.combinations_by_base_mod_names(&[]).unwrap().is_empty());
}

// ── Items and recipes ────────────────────────────────────────────

#[test]
fn items_by_ids_returns_found_and_omits_missing() {
    let store = ContentStore::open_in_memory().unwrap();
    let combo = CombinationId::new();
    store
        .insert_item(
            combo,
            &ItemData {
                id: ItemId::new(10),
                name: "iron-plate".to_string(),
            },
        )
        .unwrap();

    let items = store
        .items_by_ids(&[ItemId::new(10), ItemId::new(99)])
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[&ItemId::new(10)].name, "iron-plate");
}

#[test]
fn recipes_by_ids_roundtrips_mode_and_owner() {
    let store = ContentStore::open_in_memory().unwrap();
    let combo = CombinationId::new();
    let recipe = RecipeData {
        id: RecipeId::new(5),
        name: "iron-plate".to_string(),
        mode: RecipeMode::Expensive,
        item_id: Some(ItemId::new(10)),
    };
    store.insert_recipe(combo, &recipe).unwrap();

    let recipes = store.recipes_by_ids(&[RecipeId::new(5)]).unwrap();
    assert_eq!(recipes[&RecipeId::new(5)], recipe);
}

#[test]
fn lookups_with_empty_id_lists_do_not_query() {
    let store = ContentStore::open_in_memory().unwrap();
    assert!(store.items_by_ids(&[]).unwrap().is_empty());
    assert!(store.recipes_by_ids(&[]).unwrap().is_empty());
}

// ── Keyword matching ─────────────────────────────────────────────

fn matching_fixture() -> (ContentStore, CombinationId) {
    let store = ContentStore::open_in_memory().unwrap();
    let combo = CombinationId::new();

    store
        .insert_item(
            combo,
            &ItemData {
                id: ItemId::new(1),
                name: "stone-furnace".to_string(),
            },
        )
        .unwrap();
    store
        .insert_item(
            combo,
            &ItemData {
                id: ItemId::new(2),
                name: "steel-furnace".to_string(),
            },
        )
        .unwrap();
    store
        .insert_translation(combo, "item", 2, "de", "Stahlofen")
        .unwrap();
    store
        .insert_recipe(
            combo,
            &RecipeData {
                id: RecipeId::new(20),
                name: "stone-furnace".to_string(),
                mode: RecipeMode::Normal,
                item_id: Some(ItemId::new(1)),
            },
        )
        .unwrap();

    (store, combo)
}

#[test]
fn match_items_hits_internal_names() {
    let (store, combo) = matching_fixture();
    let hits = store.match_items(combo, "furnace").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.locale.is_none()));
}

#[test]
fn match_items_hits_localized_labels_with_locale() {
    let (store, combo) = matching_fixture();
    let hits = store.match_items(combo, "stahl").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, MatchedEntity::Item(ItemId::new(2)));
    assert_eq!(hits[0].locale.as_deref(), Some("de"));
    // The hit still carries the internal name.
    assert_eq!(hits[0].name, "steel-furnace");
}

#[test]
fn match_items_is_scoped_to_the_combination() {
    let (store, _combo) = matching_fixture();
    let other = CombinationId::new();
    assert!(store.match_items(other, "furnace").unwrap().is_empty());
}

#[test]
fn match_recipes_carries_owning_item() {
    let (store, combo) = matching_fixture();
    let hits = store.match_recipes(combo, "stone").unwrap();
    assert_eq!(hits.len(), 1);
    match &hits[0].entity {
        MatchedEntity::Recipe { id, item_id, item_name } => {
            assert_eq!(*id, RecipeId::new(20));
            assert_eq!(*item_id, Some(ItemId::new(1)));
            assert_eq!(item_name.as_deref(), Some("stone-furnace"));
        }
        other => panic!("expected recipe hit, got {other:?}"),
    }
}

#[test]
fn match_treats_like_metacharacters_as_literals() {
    let store = ContentStore::open_in_memory().unwrap();
    let combo = CombinationId::new();
    for (id, name) in [(1, "module-10a"), (2, "sale-10%-off"), (3, "a_c"), (4, "abc")] {
        store
            .insert_item(
                combo,
                &ItemData {
                    id: ItemId::new(id),
                    name: name.to_string(),
                },
            )
            .unwrap();
    }

    // "%" must only match a literal percent sign, never act as a wildcard.
    let hits = store.match_items(combo, "10%").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, MatchedEntity::Item(ItemId::new(2)));

    // "_" must not match any single character.
    let hits = store.match_items(combo, "a_c").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, MatchedEntity::Item(ItemId::new(3)));
}

#[test]
fn match_with_no_hits_is_empty_not_error() {
    let (store, combo) = matching_fixture();
    assert!(store.match_items(combo, "plutonium").unwrap().is_empty());
    assert!(store.match_recipes(combo, "plutonium").unwrap().is_empty());
}

// ── On-disk persistence ──────────────────────────────────────────

#[test]
fn content_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");

    {
        let store = ContentStore::new(&path).unwrap();
        store.insert_mod(&module(1, "base", vec![])).unwrap();
    }

    let store = ContentStore::new(&path).unwrap();
    assert_eq!(store.mods_by_names(&names(&["base"])).unwrap().len(), 1);
}
