//! Literal spellings, `@` shorthand, and comma-separated lists.

use decaf_ir::{NodeId, NodeKind, Role, TokenKind};

use super::{Cx, MainStage};
use crate::error::PatchResult;
use crate::patcher::{Hoists, PatchCx};

/// `yes`/`on` → `true`, `no`/`off` → `false`.
pub(super) fn patch_bool(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let replacement = match cx.node_text(id) {
        "yes" | "on" => "true",
        "no" | "off" => "false",
        _ => return Ok(Hoists::new()),
    };
    let span = cx.span(id);
    cx.overwrite(span.start, span.end, replacement)?;
    Ok(Hoists::new())
}

/// A bare `@` → `this`.
pub(super) fn patch_this(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    if cx.node_text(id) == "@" {
        let span = cx.span(id);
        cx.overwrite(span.start, span.end, "this")?;
    }
    Ok(Hoists::new())
}

/// `@a` → `this.a`; other member accesses only patch their object.
pub(super) fn patch_member_access(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::MemberAccess { expression, member } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a member access"));
    };
    let object = cx.span(*expression);
    if is_this_shorthand(cx, *expression, member.start) {
        cx.overwrite(object.start, object.end, "this.")?;
        return Ok(Hoists::new());
    }
    cx.patch(*expression, Role::Expression)
}

/// Whether `object` is an `@` written directly against the member name.
pub(super) fn is_this_shorthand(cx: &PatchCx<'_, MainStage>, object: NodeId, member_start: u32) -> bool {
    matches!(cx.node(object), NodeKind::This)
        && cx.node_text(object) == "@"
        && cx.span(object).end == member_start
}

/// Calls, `new`, arrays and objects: patch the children and add the
/// commas newline-separated elements leave out.
pub(super) fn patch_sequence(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let hoists = cx.patch_children(id)?;
    let elements: &[NodeId] = match cx.node(id) {
        NodeKind::FunctionApplication { arguments, .. } | NodeKind::NewOp { arguments, .. } => {
            arguments
        }
        NodeKind::ArrayInitialiser { members } | NodeKind::ObjectInitialiser { members } => {
            members
        }
        _ => return Ok(hoists),
    };
    for pair in elements.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let has_comma = cx
            .index_of_source_token_between_patchers_matching(left, right, |kind| {
                kind == TokenKind::Comma
            })
            .is_some();
        if !has_comma {
            cx.append_left(cx.outer_span(left).end, ",")?;
        }
    }
    Ok(hoists)
}
