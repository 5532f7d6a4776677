//! The read-mostly content dataset: mods, combinations, items, recipes,
//! localized labels.
//!
//! Populated by the content import pipeline; the resolver and search core
//! only read from it.

use crate::error::{StoreError, StoreResult};
use craftdex_types::{
    CombinationId, Dependency, DependencyKind, ItemId, Mod, ModCombination, ModId, RecipeData,
    RecipeId, RecipeMode,
};
use rusqlite::{Connection, params, params_from_iter};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// An item projection as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemData {
    pub id: ItemId,
    pub name: String,
}

/// Which entity a keyword hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedEntity {
    Item(ItemId),
    Recipe {
        id: RecipeId,
        /// Item the recipe produces, when known. Matches with an owning item
        /// rank and render as item results.
        item_id: Option<ItemId>,
        item_name: Option<String>,
    },
}

/// A single keyword hit against the enabled combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub entity: MatchedEntity,
    /// Internal name of the matched entity.
    pub name: String,
    /// Locale of the label that produced the hit; `None` when the internal
    /// name itself matched.
    pub locale: Option<String>,
}

/// Persistent store for the content dataset backed by SQLite.
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
}

impl ContentStore {
    /// Opens (or creates) a content store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory content store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS mods (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                author TEXT NOT NULL,
                version TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS mod_dependencies (
                mod_id INTEGER NOT NULL,
                required_name TEXT NOT NULL,
                kind TEXT NOT NULL,
                UNIQUE(mod_id, required_name)
            );

            CREATE TABLE IF NOT EXISTS mod_combinations (
                id TEXT PRIMARY KEY,
                base_mod_id INTEGER NOT NULL,
                optional_mod_ids TEXT NOT NULL,
                has_items INTEGER NOT NULL DEFAULT 0,
                has_recipes INTEGER NOT NULL DEFAULT 0,
                has_icons INTEGER NOT NULL DEFAULT 0,
                has_translations INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY,
                combination_id TEXT NOT NULL,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY,
                combination_id TEXT NOT NULL,
                name TEXT NOT NULL,
                mode TEXT NOT NULL,
                item_id INTEGER
            );

            CREATE TABLE IF NOT EXISTS translations (
                entity_type TEXT NOT NULL,
                entity_id INTEGER NOT NULL,
                combination_id TEXT NOT NULL,
                locale TEXT NOT NULL,
                label TEXT NOT NULL,
                UNIQUE(entity_type, entity_id, combination_id, locale)
            );

            CREATE INDEX IF NOT EXISTS idx_items_combination ON items(combination_id);
            CREATE INDEX IF NOT EXISTS idx_recipes_combination ON recipes(combination_id);
            CREATE INDEX IF NOT EXISTS idx_translations_entity
                ON translations(combination_id, entity_type, entity_id);
            ",
        )?;
        Ok(())
    }

    // ── Import-side writes ───────────────────────────────────────

    /// Saves a mod and its dependency edges.
    pub fn insert_mod(&self, module: &Mod) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO mods (id, name, author, version) VALUES (?1, ?2, ?3, ?4)",
            params![
                module.id.value() as i64,
                module.name,
                module.author,
                module.version
            ],
        )?;
        conn.execute(
            "DELETE FROM mod_dependencies WHERE mod_id = ?1",
            params![module.id.value() as i64],
        )?;
        for dep in &module.dependencies {
            conn.execute(
                "INSERT INTO mod_dependencies (mod_id, required_name, kind) VALUES (?1, ?2, ?3)",
                params![
                    module.id.value() as i64,
                    dep.required_mod,
                    kind_to_str(dep.kind)
                ],
            )?;
        }
        Ok(())
    }

    /// Saves a mod combination.
    pub fn insert_combination(&self, combination: &ModCombination) -> StoreResult<()> {
        let optional_ids = serde_json::to_string(
            &combination
                .optional_mod_ids
                .iter()
                .map(|id| id.value())
                .collect::<Vec<_>>(),
        )?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO mod_combinations
             (id, base_mod_id, optional_mod_ids, has_items, has_recipes, has_icons, has_translations)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                combination.id.to_string(),
                combination.base_mod_id.value() as i64,
                optional_ids,
                combination.has_items,
                combination.has_recipes,
                combination.has_icons,
                combination.has_translations,
            ],
        )?;
        Ok(())
    }

    /// Saves an item belonging to a combination.
    pub fn insert_item(&self, combination_id: CombinationId, item: &ItemData) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO items (id, combination_id, name) VALUES (?1, ?2, ?3)",
            params![item.id.value() as i64, combination_id.to_string(), item.name],
        )?;
        Ok(())
    }

    /// Saves a recipe belonging to a combination.
    pub fn insert_recipe(
        &self,
        combination_id: CombinationId,
        recipe: &RecipeData,
    ) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO recipes (id, combination_id, name, mode, item_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                recipe.id.value() as i64,
                combination_id.to_string(),
                recipe.name,
                mode_to_str(recipe.mode),
                recipe.item_id.map(|id| id.value() as i64),
            ],
        )?;
        Ok(())
    }

    /// Saves a localized label for an item or recipe.
    pub fn insert_translation(
        &self,
        combination_id: CombinationId,
        entity_type: &str,
        entity_id: u64,
        locale: &str,
        label: &str,
    ) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO translations
             (entity_type, entity_id, combination_id, locale, label)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entity_type,
                entity_id as i64,
                combination_id.to_string(),
                locale,
                label
            ],
        )?;
        Ok(())
    }

    // ── Batched lookups ──────────────────────────────────────────

    /// Loads mods (with their dependency edges) by name, in one pass.
    /// Names absent from the store are simply missing from the result.
    pub fn mods_by_names(&self, names: &[String]) -> StoreResult<HashMap<String, Mod>> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = self.conn.lock().unwrap();
        let placeholders = placeholders(names.len());

        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, author, version FROM mods WHERE name IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(params_from_iter(names.iter()), |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            let author: String = row.get(2)?;
            let version: String = row.get(3)?;
            Ok((id, name, author, version))
        })?;

        let mut mods: HashMap<String, Mod> = HashMap::new();
        let mut ids: Vec<i64> = Vec::new();
        for row in rows {
            let (id, name, author, version) = row?;
            ids.push(id);
            mods.insert(
                name.clone(),
                Mod {
                    id: ModId::new(id as u64),
                    name,
                    author,
                    version,
                    dependencies: Vec::new(),
                },
            );
        }
        if ids.is_empty() {
            return Ok(mods);
        }

        let placeholders = self::placeholders(ids.len());
        let mut stmt = conn.prepare(&format!(
            "SELECT mod_id, required_name, kind FROM mod_dependencies
             WHERE mod_id IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            let mod_id: i64 = row.get(0)?;
            let required: String = row.get(1)?;
            let kind: String = row.get(2)?;
            Ok((mod_id, required, kind))
        })?;

        let mut deps: HashMap<u64, Vec<Dependency>> = HashMap::new();
        for row in rows {
            let (mod_id, required, kind) = row?;
            deps.entry(mod_id as u64).or_default().push(Dependency {
                required_mod: required,
                kind: parse_kind(&kind)?,
            });
        }
        for module in mods.values_mut() {
            if let Some(edges) = deps.remove(&module.id.value()) {
                module.dependencies = edges;
            }
        }

        debug!(requested = names.len(), found = mods.len(), "loaded mods by name");
        Ok(mods)
    }

    /// Loads every combination whose base mod name is in the given set.
    pub fn combinations_by_base_mod_names(
        &self,
        names: &[String],
    ) -> StoreResult<Vec<ModCombination>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.conn.lock().unwrap();
        let placeholders = placeholders(names.len());
        let mut stmt = conn.prepare(&format!(
            "SELECT c.id, c.base_mod_id, m.name, c.optional_mod_ids,
                    c.has_items, c.has_recipes, c.has_icons, c.has_translations
             FROM mod_combinations c
             JOIN mods m ON m.id = c.base_mod_id
             WHERE m.name IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(params_from_iter(names.iter()), |row| {
            let id: String = row.get(0)?;
            let base_mod_id: i64 = row.get(1)?;
            let base_mod_name: String = row.get(2)?;
            let optional: String = row.get(3)?;
            let has_items: bool = row.get(4)?;
            let has_recipes: bool = row.get(5)?;
            let has_icons: bool = row.get(6)?;
            let has_translations: bool = row.get(7)?;
            Ok((
                id,
                base_mod_id,
                base_mod_name,
                optional,
                has_items,
                has_recipes,
                has_icons,
                has_translations,
            ))
        })?;

        let mut combinations = Vec::new();
        for row in rows {
            let (id, base_mod_id, base_mod_name, optional, has_items, has_recipes, has_icons, has_translations) =
                row?;
            let id = CombinationId::parse(&id)
                .map_err(|e| StoreError::InvalidData(format!("invalid combination id: {e}")))?;
            let optional_ids: Vec<u64> = serde_json::from_str(&optional)?;
            combinations.push(ModCombination {
                id,
                base_mod_id: ModId::new(base_mod_id as u64),
                base_mod_name,
                optional_mod_ids: optional_ids.into_iter().map(ModId::new).collect(),
                has_items,
                has_recipes,
                has_icons,
                has_translations,
            });
        }
        Ok(combinations)
    }

    /// Loads items by id, in one pass. Missing ids are absent from the map.
    pub fn items_by_ids(&self, ids: &[ItemId]) -> StoreResult<HashMap<ItemId, ItemData>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = self.conn.lock().unwrap();
        let placeholders = placeholders(ids.len());
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM items WHERE id IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(
            params_from_iter(ids.iter().map(|id| id.value() as i64)),
            |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                Ok((id, name))
            },
        )?;

        let mut items = HashMap::new();
        for row in rows {
            let (id, name) = row?;
            let id = ItemId::new(id as u64);
            items.insert(id, ItemData { id, name });
        }
        Ok(items)
    }

    /// Loads recipes by id, in one pass. Missing ids are absent from the map.
    pub fn recipes_by_ids(&self, ids: &[RecipeId]) -> StoreResult<HashMap<RecipeId, RecipeData>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = self.conn.lock().unwrap();
        let placeholders = placeholders(ids.len());
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, mode, item_id FROM recipes WHERE id IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(
            params_from_iter(ids.iter().map(|id| id.value() as i64)),
            |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let mode: String = row.get(2)?;
                let item_id: Option<i64> = row.get(3)?;
                Ok((id, name, mode, item_id))
            },
        )?;

        let mut recipes = HashMap::new();
        for row in rows {
            let (id, name, mode, item_id) = row?;
            let id = RecipeId::new(id as u64);
            recipes.insert(
                id,
                RecipeData {
                    id,
                    name,
                    mode: parse_mode(&mode)?,
                    item_id: item_id.map(|i| ItemId::new(i as u64)),
                },
            );
        }
        Ok(recipes)
    }

    // ── Keyword matching ─────────────────────────────────────────

    /// Finds items in the combination whose internal name or localized label
    /// contains the keyword. One hit per (item, matching locale).
    pub fn match_items(
        &self,
        combination_id: CombinationId,
        keyword: &str,
    ) -> StoreResult<Vec<KeywordMatch>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(keyword);
        let mut stmt = conn.prepare(
            "SELECT i.id, i.name, NULL FROM items i
             WHERE i.combination_id = ?1 AND i.name LIKE ?2 ESCAPE '\\'
             UNION ALL
             SELECT i.id, i.name, t.locale FROM items i
             JOIN translations t ON t.entity_type = 'item'
                 AND t.entity_id = i.id AND t.combination_id = ?1
             WHERE i.combination_id = ?1 AND t.label LIKE ?2 ESCAPE '\\'",
        )?;
        let rows = stmt.query_map(params![combination_id.to_string(), pattern], |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            let locale: Option<String> = row.get(2)?;
            Ok((id, name, locale))
        })?;

        let mut matches = Vec::new();
        for row in rows {
            let (id, name, locale) = row?;
            matches.push(KeywordMatch {
                entity: MatchedEntity::Item(ItemId::new(id as u64)),
                name,
                locale,
            });
        }
        Ok(matches)
    }

    /// Finds recipes in the combination whose internal name or localized
    /// label contains the keyword, carrying the owning item when present.
    pub fn match_recipes(
        &self,
        combination_id: CombinationId,
        keyword: &str,
    ) -> StoreResult<Vec<KeywordMatch>> {
        let conn = self.conn.lock().unwrap();
        let pattern = like_pattern(keyword);
        let mut stmt = conn.prepare(
            "SELECT r.id, r.name, NULL, r.item_id, i.name FROM recipes r
             LEFT JOIN items i ON i.id = r.item_id
             WHERE r.combination_id = ?1 AND r.name LIKE ?2 ESCAPE '\\'
             UNION ALL
             SELECT r.id, r.name, t.locale, r.item_id, i.name FROM recipes r
             LEFT JOIN items i ON i.id = r.item_id
             JOIN translations t ON t.entity_type = 'recipe'
                 AND t.entity_id = r.id AND t.combination_id = ?1
             WHERE r.combination_id = ?1 AND t.label LIKE ?2 ESCAPE '\\'",
        )?;
        let rows = stmt.query_map(params![combination_id.to_string(), pattern], |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            let locale: Option<String> = row.get(2)?;
            let item_id: Option<i64> = row.get(3)?;
            let item_name: Option<String> = row.get(4)?;
            Ok((id, name, locale, item_id, item_name))
        })?;

        let mut matches = Vec::new();
        for row in rows {
            let (id, name, locale, item_id, item_name) = row?;
            matches.push(KeywordMatch {
                entity: MatchedEntity::Recipe {
                    id: RecipeId::new(id as u64),
                    item_id: item_id.map(|i| ItemId::new(i as u64)),
                    item_name,
                },
                name,
                locale,
            });
        }
        Ok(matches)
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

// `%` and `_` in a keyword must match literally, not as wildcards.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn kind_to_str(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::Mandatory => "mandatory",
        DependencyKind::Optional => "optional",
    }
}

fn parse_kind(s: &str) -> Result<DependencyKind, rusqlite::Error> {
    match s {
        "mandatory" => Ok(DependencyKind::Mandatory),
        "optional" => Ok(DependencyKind::Optional),
        _ => Ok(DependencyKind::Optional), // unknown kinds are never auto-included
    }
}

fn mode_to_str(mode: RecipeMode) -> &'static str {
    match mode {
        RecipeMode::Normal => "normal",
        RecipeMode::Expensive => "expensive",
    }
}

fn parse_mode(s: &str) -> Result<RecipeMode, StoreError> {
    match s {
        "normal" => Ok(RecipeMode::Normal),
        "expensive" => Ok(RecipeMode::Expensive),
        other => Err(StoreError::InvalidData(format!(
            "unknown recipe mode: {other}"
        ))),
    }
}
