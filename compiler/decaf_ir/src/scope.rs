//! Lexical scope tree.
//!
//! Scopes follow the source language's rules: the program and each function
//! open a scope, and the first assignment to an otherwise unbound name
//! declares it in the innermost enclosing scope. Blocks do not open scopes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::NodeId;

/// Index of a scope in a [`ScopeTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program scope: always the first scope pushed.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// The `Program` or `Function` node that opened the scope.
    pub owner: Option<NodeId>,
    /// Names declared here, by parameter or first assignment.
    pub bindings: FxHashSet<String>,
    /// Every name read or written while this scope was innermost.
    pub references: FxHashSet<String>,
}

/// Scope analysis result for one parse.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    scope_of: FxHashMap<NodeId, ScopeId>,
    owned_scope: FxHashMap<NodeId, ScopeId>,
    declarations: FxHashSet<NodeId>,
    /// Declaring assignment to the first same-scope read that runs before it.
    early_reads: FxHashMap<NodeId, NodeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope owned by `owner` under `parent`.
    pub fn push_scope(&mut self, parent: Option<ScopeId>, owner: Option<NodeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            owner,
            ..Scope::default()
        });
        if let Some(parent) = parent {
            self.scopes[parent.index()].children.push(id);
        }
        if let Some(owner) = owner {
            self.owned_scope.insert(owner, id);
        }
        id
    }

    pub fn bind(&mut self, scope: ScopeId, name: &str) {
        self.scopes[scope.index()].bindings.insert(name.to_owned());
    }

    pub fn reference(&mut self, scope: ScopeId, name: &str) {
        self.scopes[scope.index()].references.insert(name.to_owned());
    }

    /// Record that `node` sits directly inside `scope`.
    pub fn set_scope_of(&mut self, node: NodeId, scope: ScopeId) {
        self.scope_of.insert(node, scope);
    }

    /// Record an assignment node as the declaring one for its name.
    pub fn mark_declaration(&mut self, node: NodeId) {
        self.declarations.insert(node);
    }

    /// Record that `first_read` reads the name `declaration` declares before
    /// the assignment runs. Only the first read is kept.
    pub fn mark_read_before_declaration(&mut self, declaration: NodeId, first_read: NodeId) {
        self.early_reads.entry(declaration).or_insert(first_read);
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len() as u32).map(ScopeId)
    }

    /// Innermost scope containing `node`.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.scope_of.get(&node).copied()
    }

    /// Scope opened by a `Program` or `Function` node.
    pub fn owned_scope(&self, owner: NodeId) -> Option<ScopeId> {
        self.owned_scope.get(&owner).copied()
    }

    /// Whether `node` is the assignment that declares its name.
    pub fn is_declaration(&self, node: NodeId) -> bool {
        self.declarations.contains(&node)
    }

    /// The first read of the declared name that runs before `declaration`.
    pub fn first_read_before_declaration(&self, declaration: NodeId) -> Option<NodeId> {
        self.early_reads.get(&declaration).copied()
    }

    /// Every declaring assignment read early, with its first read.
    pub fn early_reads(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.early_reads.iter().map(|(&declaration, &read)| (declaration, read))
    }

    /// Whether `name` is bound in `scope` or any ancestor.
    pub fn has_binding(&self, scope: ScopeId, name: &str) -> bool {
        self.ancestors(scope)
            .any(|s| self.scopes[s.index()].bindings.contains(name))
    }

    /// `scope` followed by each enclosing scope, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |s| self.scopes[s.index()].parent)
    }
}

#[cfg(test)]
mod tests;
