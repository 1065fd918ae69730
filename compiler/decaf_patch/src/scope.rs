//! Name bookkeeping for one stage run.
//!
//! Seeded from the parser's scope tree. Temporaries claimed by rewrites are
//! added as they are handed out, so sibling rewrites never receive the same
//! name.

use decaf_ir::{ScopeId, ScopeTree};
use rustc_hash::FxHashSet;
use tracing::debug;

pub struct ScopeTracker {
    parents: Vec<Option<ScopeId>>,
    bindings: Vec<FxHashSet<String>>,
    /// Names bound or referenced anywhere in each scope's subtree.
    subtree_names: Vec<FxHashSet<String>>,
}

impl ScopeTracker {
    pub fn new(tree: &ScopeTree) -> Self {
        let parents: Vec<_> = tree.ids().map(|id| tree.scope(id).parent).collect();
        let bindings: Vec<_> = tree.ids().map(|id| tree.scope(id).bindings.clone()).collect();
        let mut subtree_names: Vec<FxHashSet<String>> = tree
            .ids()
            .map(|id| {
                let scope = tree.scope(id);
                scope
                    .bindings
                    .iter()
                    .chain(&scope.references)
                    .cloned()
                    .collect()
            })
            .collect();

        // Parents are created before their children.
        for index in (0..subtree_names.len()).rev() {
            if let Some(parent) = parents[index] {
                let names: Vec<String> = subtree_names[index].iter().cloned().collect();
                subtree_names[parent.index()].extend(names);
            }
        }

        ScopeTracker {
            parents,
            bindings,
            subtree_names,
        }
    }

    fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |s| self.parents[s.index()])
    }

    /// Whether `name` is bound in `scope` or any enclosing scope.
    pub fn has_binding(&self, scope: ScopeId, name: &str) -> bool {
        self.ancestors(scope)
            .any(|s| self.bindings[s.index()].contains(name))
    }

    /// Whether `name` can be bound in `scope` without shadowing or capturing
    /// anything.
    fn is_free(&self, scope: ScopeId, name: &str) -> bool {
        !self.has_binding(scope, name) && !self.subtree_names[scope.index()].contains(name)
    }

    /// Bind and return the first free name of `base`, `base1`, `base2`, ...
    pub fn claim_free_binding(&mut self, scope: ScopeId, base: &str) -> String {
        let name = std::iter::once(base.to_owned())
            .chain((1u32..).map(|n| format!("{base}{n}")))
            .find(|candidate| self.is_free(scope, candidate))
            .unwrap_or_else(|| base.to_owned());
        debug!(%name, scope = scope.index(), "claimed free binding");
        self.bindings[scope.index()].insert(name.clone());
        let chain: Vec<ScopeId> = self.ancestors(scope).collect();
        for s in chain {
            self.subtree_names[s.index()].insert(name.clone());
        }
        name
    }
}

#[cfg(test)]
mod tests;
