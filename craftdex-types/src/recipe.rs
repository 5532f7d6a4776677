//! Lightweight recipe projections and their collection.
//!
//! `RecipeDataCollection` paginates over *distinct recipe names*, not raw
//! rows: recipes sharing a name (e.g. normal and expensive crafting modes)
//! form one group and are returned together.

use crate::{ItemId, RecipeId};
use serde::{Deserialize, Serialize};

/// Crafting mode of a recipe variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeMode {
    Normal,
    Expensive,
}

/// A recipe projection as read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeData {
    pub id: RecipeId,
    pub name: String,
    pub mode: RecipeMode,
    /// The item this recipe row was matched through, if any.
    pub item_id: Option<ItemId>,
}

/// A filterable, name-group-paginated collection of recipe projections.
///
/// Rows keep their insertion order; groups are formed in first-seen order of
/// their names so slicing is reproducible.
#[derive(Debug, Clone, Default)]
pub struct RecipeDataCollection {
    values: Vec<RecipeData>,
}

impl RecipeDataCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends a recipe projection.
    pub fn add(&mut self, recipe: RecipeData) {
        self.values.push(recipe);
    }

    /// Returns the number of rows (not groups).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the collection holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns all rows in insertion order.
    #[must_use]
    pub fn values(&self) -> &[RecipeData] {
        &self.values
    }

    /// Returns the first row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&RecipeData> {
        self.values.first()
    }

    /// Keeps only rows with the given crafting mode.
    #[must_use]
    pub fn filter_mode(&self, mode: RecipeMode) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|r| r.mode == mode)
                .cloned()
                .collect(),
        }
    }

    /// Keeps only rows matched through the given item.
    #[must_use]
    pub fn filter_item(&self, item_id: ItemId) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|r| r.item_id == Some(item_id))
                .cloned()
                .collect(),
        }
    }

    /// Returns the number of distinct recipe names.
    #[must_use]
    pub fn count_names(&self) -> usize {
        self.group_names().len()
    }

    /// Takes `limit` name-groups starting at group offset `offset`, flattened
    /// back to rows in group order. `limit == 0` keeps every group from
    /// `offset` onwards.
    #[must_use]
    pub fn limit_names(&self, limit: usize, offset: usize) -> Self {
        let names = self.group_names();
        let end = if limit == 0 {
            names.len()
        } else {
            names.len().min(offset.saturating_add(limit))
        };
        let wanted: Vec<&str> = names
            .get(offset..end)
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
            .collect();

        let mut out = Self::new();
        for name in wanted {
            for row in self.values.iter().filter(|r| r.name == name) {
                out.add(row.clone());
            }
        }
        out
    }

    fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in &self.values {
            if !names.iter().any(|n| n == &row.name) {
                names.push(row.name.clone());
            }
        }
        names
    }
}

impl FromIterator<RecipeData> for RecipeDataCollection {
    fn from_iter<I: IntoIterator<Item = RecipeData>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
