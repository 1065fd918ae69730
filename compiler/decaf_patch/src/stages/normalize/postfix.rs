//! Postfix conditionals and loops, and `loop`.

use decaf_ir::{NodeId, NodeKind, Role, TokenKind};

use super::NormalizeStage;
use crate::error::PatchResult;
use crate::patcher::{Hoists, PatchCx};

/// `a if b` → `if b then a`; likewise `unless`, `while` and `until`.
///
/// The body is patched first, moved out from before the keyword, and
/// re-inserted after the condition.
pub(super) fn patch_postfix(
    cx: &mut PatchCx<'_, NormalizeStage>,
    id: NodeId,
) -> PatchResult<Hoists> {
    let (body, condition) = match cx.node(id) {
        NodeKind::Conditional {
            consequent,
            condition,
            ..
        } => (*consequent, *condition),
        NodeKind::While {
            body,
            condition: Some(condition),
            ..
        } => (*body, *condition),
        _ => return Err(cx.unsupported(id, "expected a postfix conditional or loop")),
    };

    let mut hoists = cx.patch(body, Role::Statement)?;
    hoists.append(cx.patch(condition, Role::Expression)?);

    let body_span = cx.block_outer_span(body);
    let condition_span = cx.span(condition);
    let keyword = cx.expect_token_between(
        id,
        body_span.end,
        condition_span.start,
        "postfix keyword",
        |kind| {
            matches!(
                kind,
                TokenKind::If | TokenKind::Unless | TokenKind::While | TokenKind::Until
            )
        },
    )?;

    let body_code = cx.slice(body_span.start, body_span.end)?;
    cx.remove(body_span.start, keyword.span.start)?;
    cx.append_left(condition_span.end, &format!(" then {body_code}"))?;
    Ok(hoists)
}

/// `loop` → `while true`; an inline body also needs `then`.
pub(super) fn patch_loop(cx: &mut PatchCx<'_, NormalizeStage>, id: NodeId) -> PatchResult<Hoists> {
    if !matches!(cx.node(id), NodeKind::While { .. }) {
        return Err(cx.unsupported(id, "expected `loop`"));
    }

    let span = cx.span(id);
    let keyword = cx.expect_token_between(id, span.start, span.end, "`loop`", |kind| {
        kind == TokenKind::Loop
    })?;
    cx.overwrite(keyword.span.start, keyword.span.end, "while true")?;
    cx.patch_children(id)
}
