//! The two stages of the pipeline.

pub mod main;
pub mod normalize;

use decaf_ir::{Ast, NodeId, NodeKind};

/// Whether evaluating `id` twice is indistinguishable from evaluating it
/// once: names, literals, `this`, and plain member accesses built from
/// those.
pub(crate) fn is_repeatable_node(ast: &Ast, id: NodeId) -> bool {
    match ast.kind(id) {
        NodeKind::Identifier(_)
        | NodeKind::Number
        | NodeKind::String
        | NodeKind::Regex
        | NodeKind::Bool
        | NodeKind::Null
        | NodeKind::Undefined
        | NodeKind::This => true,
        NodeKind::MemberAccess { expression, .. } => is_repeatable_node(ast, *expression),
        NodeKind::DynamicMemberAccess { expression, index } => {
            is_repeatable_node(ast, *expression) && is_repeatable_node(ast, *index)
        }
        _ => false,
    }
}
