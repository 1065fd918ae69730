//! Node-to-patcher dispatch.
//!
//! Patchers are chosen bottom-up: ids are visited in ascending order, which
//! the arena guarantees puts every child before its parent, so a stage's
//! `patcher_for` can inspect the kinds already chosen for the children.

use decaf_ir::Ast;
use tracing::debug;

use crate::patcher::Stage;

pub(crate) fn build_patchers<S: Stage>(ast: &Ast) -> Vec<S::Kind> {
    let mut built = Vec::with_capacity(ast.len());
    for id in ast.ids() {
        let kind = S::patcher_for(ast, id, &built);
        built.push(kind);
    }
    debug!(stage = %S::NAME, patchers = built.len(), "built patcher tree");
    built
}
