//! Validation of mod combinations against the enabled mod set.

use crate::error::ResolveResult;
use craftdex_store::ContentStore;
use craftdex_types::{CombinationId, ModId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Selects the valid combinations for a resolved set of mod names.
///
/// A combination is valid iff every one of its optional mods is itself among
/// the base mods of the fetched combinations, i.e. all of them are enabled.
pub struct ModCombinationResolver {
    store: Arc<ContentStore>,
}

impl ModCombinationResolver {
    /// Creates a resolver over the given content store.
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Returns the ids of the valid combinations, sorted for determinism.
    /// An empty input returns empty without touching the store.
    pub fn resolve(&self, mod_names: &[String]) -> ResolveResult<Vec<CombinationId>> {
        if mod_names.is_empty() {
            return Ok(Vec::new());
        }

        let combinations = self.store.combinations_by_base_mod_names(mod_names)?;
        let enabled_base_ids: HashSet<ModId> =
            combinations.iter().map(|c| c.base_mod_id).collect();

        let mut ids: Vec<CombinationId> = combinations
            .into_iter()
            .filter(|c| {
                c.optional_mod_ids
                    .iter()
                    .all(|id| enabled_base_ids.contains(id))
            })
            .map(|c| c.id)
            .collect();
        ids.sort();

        debug!(
            mods = mod_names.len(),
            combinations = ids.len(),
            "valid combinations resolved"
        );
        Ok(ids)
    }
}
