use craftdex_types::{CombinationId, ItemId, ModId, RecipeId};
use uuid::Uuid;

// ── CombinationId ────────────────────────────────────────────────

#[test]
fn combination_ids_are_unique() {
    let a = CombinationId::new();
    let b = CombinationId::new();
    assert_ne!(a, b);
}

#[test]
fn combination_id_roundtrips_through_string() {
    let id = CombinationId::new();
    let parsed = CombinationId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn combination_id_from_uuid_preserves_value() {
    let uuid = Uuid::now_v7();
    let id = CombinationId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn combination_id_parse_rejects_garbage() {
    assert!(matches!(
        CombinationId::parse("not-a-uuid"),
        Err(craftdex_types::Error::InvalidUuid(_))
    ));
    assert!("not-a-uuid".parse::<CombinationId>().is_err());
}

#[test]
fn combination_id_serde_is_transparent() {
    let id = CombinationId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: CombinationId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn v7_combination_ids_sort_by_creation_time() {
    let earlier = CombinationId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let later = CombinationId::new();
    assert!(earlier < later);
}

// ── Numeric ids ──────────────────────────────────────────────────

#[test]
fn numeric_id_wraps_value() {
    assert_eq!(ModId::new(7).value(), 7);
    assert_eq!(ItemId::new(42).value(), 42);
    assert_eq!(RecipeId::new(0).value(), 0);
}

#[test]
fn numeric_id_from_u64() {
    let id: ItemId = 99u64.into();
    assert_eq!(id, ItemId::new(99));
}

#[test]
fn numeric_id_display_is_plain_number() {
    assert_eq!(RecipeId::new(123).to_string(), "123");
}

#[test]
fn numeric_id_serde_is_transparent() {
    let json = serde_json::to_string(&ItemId::new(5)).unwrap();
    assert_eq!(json, "5");
    let back: ItemId = serde_json::from_str("5").unwrap();
    assert_eq!(back, ItemId::new(5));
}

#[test]
fn numeric_ids_order_numerically() {
    assert!(RecipeId::new(2) < RecipeId::new(10));
}
