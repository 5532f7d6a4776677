//! The read-only mod and combination model.
//!
//! Mods and combinations are loaded from storage by the content import
//! pipeline and never mutated by the resolver or search core.

use crate::{CombinationId, ModId};
use serde::{Deserialize, Serialize};

/// Whether a dependency must be present for the dependent mod to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// The required mod must be enabled; the dependency resolver follows
    /// these edges transitively.
    Mandatory,
    /// The required mod may be enabled; never auto-included.
    Optional,
}

/// A dependency edge from one mod to another, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub required_mod: String,
    pub kind: DependencyKind,
}

impl Dependency {
    /// Shorthand for a mandatory dependency edge.
    pub fn mandatory(required_mod: &str) -> Self {
        Self {
            required_mod: required_mod.to_string(),
            kind: DependencyKind::Mandatory,
        }
    }

    /// Shorthand for an optional dependency edge.
    pub fn optional(required_mod: &str) -> Self {
        Self {
            required_mod: required_mod.to_string(),
            kind: DependencyKind::Optional,
        }
    }
}

/// A named content package with its dependency edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mod {
    pub id: ModId,
    /// Unique name, the primary identity used in requests.
    pub name: String,
    pub author: String,
    pub version: String,
    pub dependencies: Vec<Dependency>,
}

/// A precomputed grouping anchored to one base mod plus a set of optional
/// mods — the unit of "which data is queryable together".
///
/// The combination is only valid for a request when all of its optional mods
/// are themselves enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModCombination {
    pub id: CombinationId,
    pub base_mod_id: ModId,
    /// Base mod name, denormalized for batch lookup by request mod names.
    pub base_mod_name: String,
    pub optional_mod_ids: Vec<ModId>,
    pub has_items: bool,
    pub has_recipes: bool,
    pub has_icons: bool,
    pub has_translations: bool,
}
