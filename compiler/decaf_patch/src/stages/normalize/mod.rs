//! Normalize stage: rewrite optional and ambiguous forms into a canonical
//! subset of the source language.
//!
//! Output is still source-language text. Postfix conditionals and loops are
//! turned around, `loop` becomes `while true`, and soaked chains become
//! parenthesized guarded conditionals. Everything else passes through
//! untouched, so the main stage never sees any of these forms.

mod postfix;
mod soak;

use decaf_ir::{Ast, NodeId, NodeKind};

use super::is_repeatable_node;
use crate::error::PatchResult;
use crate::options::StageName;
use crate::patcher::{Hoist, Hoists, PatchCx, Stage};

/// The normalize stage.
#[derive(Copy, Clone, Debug, Default)]
pub struct NormalizeStage;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NormalizeKind {
    Passthrough,
    PostfixConditional,
    PostfixWhile,
    Loop,
    /// A link of an access/call chain. `soak` is set when the link or any
    /// link below it is soaked; `top` when nothing above continues the
    /// chain up to the next soak.
    Chain { soak: bool, top: bool },
}

impl Stage for NormalizeStage {
    const NAME: StageName = StageName::Normalize;
    type Kind = NormalizeKind;

    fn patcher_for(ast: &Ast, id: NodeId, built: &[NormalizeKind]) -> NormalizeKind {
        match ast.kind(id) {
            NodeKind::Conditional { postfix: true, .. } => NormalizeKind::PostfixConditional,
            NodeKind::While { postfix: true, .. } => NormalizeKind::PostfixWhile,
            NodeKind::While { is_loop: true, .. } => NormalizeKind::Loop,
            _ => match ast.object_of(id) {
                Some(object) => {
                    let soak = ast.is_soaked(id)
                        || matches!(built[object.index()], NormalizeKind::Chain { soak: true, .. });
                    let top = !ast.is_object_of_parent(id)
                        || ast.parent(id).is_some_and(|parent| ast.is_soaked(parent));
                    NormalizeKind::Chain { soak, top }
                }
                None => NormalizeKind::Passthrough,
            },
        }
    }

    fn patch_as_expression(cx: &mut PatchCx<'_, Self>, id: NodeId) -> PatchResult<Hoists> {
        match cx.kind(id) {
            NormalizeKind::PostfixConditional | NormalizeKind::PostfixWhile => {
                postfix::patch_postfix(cx, id)
            }
            NormalizeKind::Loop => postfix::patch_loop(cx, id),
            NormalizeKind::Chain {
                soak: true,
                top: true,
            } => soak::patch_soaked_chain(cx, id),
            NormalizeKind::Chain { .. } | NormalizeKind::Passthrough => cx.patch_children(id),
        }
    }

    fn is_repeatable(cx: &PatchCx<'_, Self>, id: NodeId) -> bool {
        is_repeatable_node(cx.ast(), id)
    }

    /// Temporaries are assigned inline and declared by the scope analysis
    /// of the re-parse.
    fn temporary_declaration(_name: &str) -> Option<Hoist> {
        None
    }
}

#[cfg(test)]
mod tests;
