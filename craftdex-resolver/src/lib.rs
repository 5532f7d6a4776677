//! Mod dependency and combination resolution.
//!
//! Turning a request's enabled mod names into queryable combination ids is a
//! two-step pass:
//!
//! 1. [`ModDependencyResolver`] expands the names with the transitive closure
//!    of mandatory dependencies (optional dependencies are never followed).
//! 2. [`ModCombinationResolver`] fetches the combinations anchored to those
//!    mods and keeps only the ones whose optional mods are all enabled.
//!
//! [`EnabledCombinationResolver`] composes both for the API layer.

mod combination;
mod dependency;
mod error;

pub use combination::ModCombinationResolver;
pub use dependency::ModDependencyResolver;
pub use error::{ResolveError, ResolveResult};

use craftdex_store::ContentStore;
use craftdex_types::CombinationId;
use std::sync::Arc;

/// Composes dependency and combination resolution into the single operation
/// the API layer calls per request.
pub struct EnabledCombinationResolver {
    dependencies: ModDependencyResolver,
    combinations: ModCombinationResolver,
}

impl EnabledCombinationResolver {
    /// Creates a resolver over the given content store.
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            dependencies: ModDependencyResolver::new(Arc::clone(&store)),
            combinations: ModCombinationResolver::new(store),
        }
    }

    /// Resolves requested mod names into the closed, valid set of
    /// combination ids that must be queried.
    pub fn resolve_enabled_combinations(
        &self,
        mod_names: &[String],
    ) -> ResolveResult<Vec<CombinationId>> {
        let closed = self.dependencies.resolve(mod_names)?;
        let names: Vec<String> = closed.into_iter().collect();
        self.combinations.resolve(&names)
    }
}
