//! Soaked chains: `a?.b`, `a?[b]`, `f?(a)`.
//!
//! Each soak guards the rest of its chain, up to the next soak or the end
//! of the chain, with a parenthesized conditional:
//!
//! ```text
//! a?.b.c      (if a? then a.b.c)
//! f()?.b      (if (ref = f())? then ref.b)
//! f?(x)       (if typeof f is 'function' then f(x))
//! ```
//!
//! The guarded object is captured in a temporary when it is not
//! repeatable. Nested soaks work out inside-out: an inner conditional is
//! already in place when the outer one captures it as its object.

use decaf_ir::{NodeId, TokenKind};

use super::NormalizeStage;
use crate::error::PatchResult;
use crate::patcher::{Hoists, PatchCx, RepeatableOptions};

pub(super) fn patch_soaked_chain(
    cx: &mut PatchCx<'_, NormalizeStage>,
    top: NodeId,
) -> PatchResult<Hoists> {
    let ast = cx.ast();

    // Links from `top` down to the soak they continue, soak last.
    let mut links = vec![top];
    let mut soak = top;
    while !ast.is_soaked(soak) {
        soak = ast
            .object_of(soak)
            .ok_or_else(|| cx.unsupported(top, "soaked chain without a soaked link"))?;
        links.push(soak);
    }
    let object = ast
        .object_of(soak)
        .ok_or_else(|| cx.unsupported(soak, "soaked link without an object"))?;

    let (reference, mut hoists) = cx.patch_repeatable(object, RepeatableOptions::named("ref"))?;

    // Indices and arguments, outermost link last so source order holds.
    for &link in links.iter().rev() {
        let link_object = ast.object_of(link);
        for (child, role) in cx.node(link).children_with_roles() {
            if Some(child) != link_object {
                hoists.append(cx.patch(child, role)?);
            }
        }
    }

    let soak_span = cx.span(soak);
    let operator = cx.expect_token_between(
        soak,
        cx.span(object).end,
        soak_span.end,
        "soak operator",
        |kind| {
            matches!(
                kind,
                TokenKind::QuestionDot | TokenKind::QuestionLBracket | TokenKind::QuestionLParen
            )
        },
    )?;
    let (guard, replacement) = match operator.kind {
        TokenKind::QuestionDot => ("(if ", format!("? then {reference}.")),
        TokenKind::QuestionLBracket => ("(if ", format!("? then {reference}[")),
        _ => ("(if typeof ", format!(" is 'function' then {reference}(")),
    };
    cx.overwrite(operator.span.start, operator.span.end, &replacement)?;

    let span = cx.span(top);
    cx.prepend_right(span.start, guard)?;
    cx.append_left(span.end, ")")?;
    Ok(hoists)
}
