//! Lexical scope analysis.
//!
//! The program and each function open a scope. A name is bound in the
//! scope of its first assignment unless an enclosing scope already binds
//! it; that assignment is recorded as the declaration. Parameters bind in
//! the function's scope. Every identifier use is recorded as a reference.
//! A read in the declaring scope that runs before the declaring assignment
//! (earlier in the source, or inside the assigned value) is recorded too.

use decaf_ir::{Ast, NodeId, NodeKind, ScopeId, ScopeTree};
use decaf_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

/// Build the scope tree for a finished AST.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = ast.len()))]
pub fn analyze(ast: &Ast) -> ScopeTree {
    let mut scopes = ScopeTree::new();
    let root = ast.root();
    let program = scopes.push_scope(None, Some(root));
    let mut analyzer = Analyzer {
        ast,
        scopes: &mut scopes,
        unbound_reads: FxHashMap::default(),
        declaring: Vec::new(),
    };
    analyzer.visit(root, program);
    scopes
}

struct Analyzer<'a> {
    ast: &'a Ast,
    scopes: &'a mut ScopeTree,
    /// First read of each name no scope binds yet, keyed by its scope.
    unbound_reads: FxHashMap<(ScopeId, &'a str), NodeId>,
    /// Declaring assignments whose children are being visited.
    declaring: Vec<(ScopeId, NodeId, NodeId)>,
}

impl<'a> Analyzer<'a> {
    fn visit(&mut self, id: NodeId, scope: ScopeId) {
        ensure_sufficient_stack(|| self.visit_inner(id, scope));
    }

    fn visit_inner(&mut self, id: NodeId, scope: ScopeId) {
        self.scopes.set_scope_of(id, scope);
        match self.ast.kind(id) {
            NodeKind::Identifier(name) => {
                self.scopes.reference(scope, name);
                self.note_read(id, scope, name);
            }
            NodeKind::Function {
                parameters, body, ..
            } => {
                let inner = self.scopes.push_scope(Some(scope), Some(id));
                for &param in parameters {
                    self.visit_parameter(param, inner);
                }
                if let Some(body) = *body {
                    self.visit(body, inner);
                }
            }
            NodeKind::AssignOp { assignee, .. }
            | NodeKind::CompoundAssignOp { assignee, .. }
            | NodeKind::LogicalAssignOp { assignee, .. } => {
                if let Some(name) = self.ast.identifier_name(*assignee) {
                    if !self.scopes.has_binding(scope, name) {
                        self.scopes.bind(scope, name);
                        self.scopes.mark_declaration(id);
                        if let Some(read) = self.unbound_reads.remove(&(scope, name)) {
                            self.scopes.mark_read_before_declaration(id, read);
                        }
                        self.declaring.push((scope, id, *assignee));
                        self.visit_children(id, scope);
                        self.declaring.pop();
                        return;
                    }
                }
                self.visit_children(id, scope);
            }
            NodeKind::ObjectMember { key, value } => {
                // Only shorthand members read their key as a variable.
                if value.is_none() {
                    self.visit(*key, scope);
                } else {
                    self.scopes.set_scope_of(*key, scope);
                }
                if let Some(value) = *value {
                    self.visit(value, scope);
                }
            }
            _ => self.visit_children(id, scope),
        }
    }

    /// Track reads that run before the assignment declaring their name.
    fn note_read(&mut self, id: NodeId, scope: ScopeId, name: &'a str) {
        let ast = self.ast;
        let in_own_value = self
            .declaring
            .iter()
            .rev()
            .find(|&&(declared_in, _, assignee)| {
                declared_in == scope && assignee != id && ast.identifier_name(assignee) == Some(name)
            })
            .map(|&(_, declaration, _)| declaration);
        if let Some(declaration) = in_own_value {
            self.scopes.mark_read_before_declaration(declaration, id);
        } else if !self.scopes.has_binding(scope, name) {
            self.unbound_reads.entry((scope, name)).or_insert(id);
        }
    }

    fn visit_children(&mut self, id: NodeId, scope: ScopeId) {
        for child in self.ast.kind(id).children() {
            self.visit(child, scope);
        }
    }

    fn visit_parameter(&mut self, param: NodeId, scope: ScopeId) {
        self.scopes.set_scope_of(param, scope);
        match self.ast.kind(param) {
            NodeKind::Identifier(name) => {
                self.scopes.bind(scope, name);
                self.scopes.reference(scope, name);
            }
            NodeKind::DefaultParam { param: inner, default } => {
                self.visit_parameter(*inner, scope);
                self.visit(*default, scope);
            }
            // `@name` assigns a property and binds nothing.
            _ => self.visit_children(param, scope),
        }
    }
}

#[cfg(test)]
mod tests;
