//! Transitive closure of mandatory mod dependencies.

use crate::error::{ResolveError, ResolveResult};
use craftdex_store::ContentStore;
use craftdex_types::{DependencyKind, Mod};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Visit marker for the depth-first walk. A mod is `InProgress` between its
/// first visit and the completion of its dependency subtree; reaching an
/// `InProgress` mod again means the dependency graph has a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

enum Frame {
    Enter(String),
    Exit(String),
}

/// Expands a set of mod names with every mod transitively required through
/// mandatory dependencies.
///
/// Optional dependencies are never followed. Names absent from the store are
/// silently dropped. Mod metadata is batch-fetched per missing set and
/// memoized for the duration of one `resolve` call.
pub struct ModDependencyResolver {
    store: Arc<ContentStore>,
}

impl ModDependencyResolver {
    /// Creates a resolver over the given content store.
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Returns `mod_names` plus the mandatory closure, as a sorted set.
    pub fn resolve(&self, mod_names: &[String]) -> ResolveResult<BTreeSet<String>> {
        let mut fetched: HashMap<String, Mod> = HashMap::new();
        let mut missing: HashSet<String> = HashSet::new();
        let mut state: HashMap<String, VisitState> = HashMap::new();
        let mut resolved: BTreeSet<String> = BTreeSet::new();

        self.fetch_missing(mod_names, &mut fetched, &mut missing)?;

        let mut stack: Vec<Frame> = mod_names
            .iter()
            .rev()
            .map(|name| Frame::Enter(name.clone()))
            .collect();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(name) => {
                    match state.get(&name) {
                        Some(VisitState::Done) => continue,
                        Some(VisitState::InProgress) => {
                            return Err(ResolveError::DependencyCycle(name));
                        }
                        None => {}
                    }
                    let Some(module) = fetched.get(&name) else {
                        // Referenced but absent from storage: drop silently.
                        continue;
                    };

                    let mandatory: Vec<String> = module
                        .dependencies
                        .iter()
                        .filter(|d| d.kind == DependencyKind::Mandatory)
                        .map(|d| d.required_mod.clone())
                        .collect();

                    state.insert(name.clone(), VisitState::InProgress);
                    stack.push(Frame::Exit(name));

                    self.fetch_missing(&mandatory, &mut fetched, &mut missing)?;
                    for dep in mandatory.into_iter().rev() {
                        if state.get(&dep) != Some(&VisitState::Done) {
                            stack.push(Frame::Enter(dep));
                        }
                    }
                }
                Frame::Exit(name) => {
                    state.insert(name.clone(), VisitState::Done);
                    resolved.insert(name);
                }
            }
        }

        debug!(
            requested = mod_names.len(),
            resolved = resolved.len(),
            "mandatory dependency closure computed"
        );
        Ok(resolved)
    }

    /// Batch-fetches any of `names` not yet seen, remembering definite misses
    /// so they are not refetched within this resolution pass.
    fn fetch_missing(
        &self,
        names: &[String],
        fetched: &mut HashMap<String, Mod>,
        missing: &mut HashSet<String>,
    ) -> ResolveResult<()> {
        let wanted: Vec<String> = names
            .iter()
            .filter(|n| !fetched.contains_key(*n) && !missing.contains(*n))
            .cloned()
            .collect();
        if wanted.is_empty() {
            return Ok(());
        }

        let found = self.store.mods_by_names(&wanted)?;
        for name in wanted {
            if !found.contains_key(&name) {
                missing.insert(name);
            }
        }
        fetched.extend(found);
        Ok(())
    }
}
