//! Core type definitions for Craftdex.
//!
//! This crate defines the fundamental types shared by the resolver, store,
//! and search crates:
//! - Mod, item, recipe, and combination identifiers
//! - The read-only content model (mods, dependencies, combinations)
//! - Search result priority tiers
//! - Lightweight recipe projections with name-group pagination
//!
//! HTTP request/response shapes belong to the embedding API layer, not here.

mod ids;
mod mods;
mod priority;
mod recipe;

pub use ids::{CombinationId, ItemId, ModId, RecipeId};
pub use mods::{Dependency, DependencyKind, Mod, ModCombination};
pub use priority::ResultPriority;
pub use recipe::{RecipeData, RecipeDataCollection, RecipeMode};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
