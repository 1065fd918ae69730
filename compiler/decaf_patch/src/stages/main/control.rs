//! `if`/`unless` and `while`/`until`.

use decaf_ir::{NodeId, NodeKind, Role, Token, TokenKind};

use super::{Cx, MainStage};
use crate::error::PatchResult;
use crate::patcher::{Hoists, PatchCx, PatcherFlags};

fn is_inline_block(cx: &PatchCx<'_, MainStage>, id: NodeId) -> bool {
    matches!(cx.node(id), NodeKind::Block { inline: true, .. })
}

/// Operands `!` binds to without extra parentheses.
fn negates_cleanly(cx: &PatchCx<'_, MainStage>, id: NodeId) -> bool {
    matches!(
        cx.node(id),
        NodeKind::Identifier(_)
            | NodeKind::MemberAccess { .. }
            | NodeKind::DynamicMemberAccess { .. }
            | NodeKind::FunctionApplication { .. }
            | NodeKind::This
            | NodeKind::Bool
            | NodeKind::Null
            | NodeKind::Undefined
    )
}

fn keyword(cx: &PatchCx<'_, MainStage>, id: NodeId) -> PatchResult<Token> {
    cx.first_token(id)
        .and_then(|index| cx.source_token_at_index(index))
        .ok_or_else(|| cx.missing_token(id, "keyword"))
}

/// Patch a condition, negating it for `unless`/`until`, and give a
/// statement's condition its parentheses.
fn patch_condition(
    cx: Cx<'_, '_>,
    condition: NodeId,
    negated: bool,
    statement: bool,
) -> PatchResult<Hoists> {
    let hoists = cx.patch(condition, Role::Expression)?;
    let span = cx.span(condition);
    let outer = cx.outer_span(condition);
    let parenthesized = outer != span;

    if negated {
        if parenthesized || negates_cleanly(cx, condition) {
            cx.prepend_right(outer.start, "!")?;
        } else {
            cx.prepend_right(outer.start, "!(")?;
            cx.append_left(outer.end, ")")?;
        }
    }
    if statement && (negated || !parenthesized) {
        cx.prepend_right(outer.start, "(")?;
        cx.append_left(outer.end, ")")?;
    }
    Ok(hoists)
}

/// `then` → `{`, or ` {` after the condition of a block clause.
fn open_clause(cx: Cx<'_, '_>, condition_end: u32, body: NodeId) -> PatchResult<()> {
    let body_start = cx.block_outer_span(body).start;
    match cx.index_of_token_between(condition_end, body_start, |kind| kind == TokenKind::Then) {
        Some(index) => {
            let then = cx.tokens()[index].span;
            cx.overwrite(then.start, then.end, "{")
        }
        None => cx.append_left(condition_end, " {"),
    }
}

/// ` }` after an inline body, or `}` on its own line at the indentation of
/// the statement that opened it.
fn close_clause(cx: Cx<'_, '_>, owner: NodeId, body: NodeId) -> PatchResult<()> {
    let end = cx.block_outer_span(body).end;
    if is_inline_block(cx, body) {
        cx.append_left(end, " }")
    } else {
        let close = format!("\n{}}}", cx.indent(owner));
        cx.append_left(end, &close)
    }
}

pub(super) fn patch_conditional_statement(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::Conditional {
        condition,
        consequent,
        alternate,
        negated,
        ..
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a conditional"));
    };
    let (condition, consequent, alternate, negated) = (*condition, *consequent, *alternate, *negated);

    if cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN) {
        cx.set_flag(consequent, PatcherFlags::IMPLICIT_RETURN);
        if let Some(alternate) = alternate {
            cx.set_flag(alternate, PatcherFlags::IMPLICIT_RETURN);
        }
    }

    if negated {
        let keyword = keyword(cx, id)?.span;
        cx.overwrite(keyword.start, keyword.end, "if")?;
    }
    let mut hoists = patch_condition(cx, condition, negated, true)?;
    open_clause(cx, cx.outer_span(condition).end, consequent)?;
    hoists.append(cx.patch(consequent, Role::Statement)?);
    close_clause(cx, id, consequent)?;

    if let Some(alternate) = alternate {
        let consequent_end = cx.block_outer_span(consequent).end;
        let else_token = cx.expect_token_between(
            id,
            consequent_end,
            cx.span(alternate).start,
            "`else`",
            |kind| kind == TokenKind::Else,
        )?;
        let else_span = else_token.span;
        if !is_inline_block(cx, consequent) && !cx.has_comments_between(consequent_end, else_span.start) {
            cx.overwrite(consequent_end, else_span.start, " ")?;
        }

        if matches!(cx.node(alternate), NodeKind::Conditional { .. }) {
            hoists.append(cx.patch(alternate, Role::Statement)?);
        } else {
            cx.append_left(else_span.end, " {")?;
            hoists.append(cx.patch(alternate, Role::Statement)?);
            close_clause(cx, id, alternate)?;
        }
    }

    cx.set_flag(id, PatcherFlags::BLOCK_STATEMENT);
    Ok(hoists)
}

/// The expression a branch of a conditional expression evaluates to.
fn branch_value(cx: &PatchCx<'_, MainStage>, id: NodeId, branch: NodeId) -> PatchResult<NodeId> {
    if matches!(cx.node(branch), NodeKind::Conditional { .. }) {
        return Ok(branch);
    }
    match cx.node(branch) {
        NodeKind::Block { statements, .. } => match statements.as_slice() {
            [statement]
                if !matches!(
                    cx.node(*statement),
                    NodeKind::Return { .. }
                        | NodeKind::Throw { .. }
                        | NodeKind::Break
                        | NodeKind::Continue
                        | NodeKind::While { .. }
                ) =>
            {
                Ok(*statement)
            }
            _ => Err(cx.unsupported(
                id,
                "a conditional used as a value needs exactly one expression per branch",
            )),
        },
        _ => Err(cx.unsupported(id, "unexpected conditional branch")),
    }
}

/// `if a then b else c` used as a value → `(a ? b : c)`.
pub(super) fn patch_conditional_expression(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::Conditional {
        condition,
        consequent,
        alternate,
        negated,
        ..
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a conditional"));
    };
    let (condition, negated) = (*condition, *negated);
    let consequent = branch_value(cx, id, *consequent)?;
    let alternate = alternate
        .map(|alternate| branch_value(cx, id, alternate))
        .transpose()?;
    let keyword = keyword(cx, id)?.span;

    let mut hoists = patch_condition(cx, condition, negated, false)?;
    hoists.append(cx.patch(consequent, Role::Expression)?);
    if let Some(alternate) = alternate {
        hoists.append(cx.patch(alternate, Role::Expression)?);
    }

    let condition = cx.outer_span(condition);
    let consequent = cx.outer_span(consequent);
    cx.remove(keyword.start, condition.start)?;
    cx.remove(condition.end, consequent.start)?;
    cx.append_left(condition.end, " ? ")?;
    match alternate {
        Some(alternate) => {
            cx.remove(consequent.end, cx.outer_span(alternate).start)?;
            cx.append_left(consequent.end, " : ")?;
        }
        None => cx.append_left(consequent.end, " : undefined")?,
    }

    if !cx.is_surrounded_by_parentheses(id) {
        cx.parenthesize(id)?;
    }
    Ok(hoists)
}

pub(super) fn patch_while(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    if cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN) || cx.is_surrounded_by_parentheses(id) {
        return Err(cx.unsupported(id, "a loop cannot be used as a value"));
    }
    let NodeKind::While {
        condition: Some(condition),
        body,
        negated,
        ..
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a `while` loop"));
    };
    let (condition, body, negated) = (*condition, *body, *negated);

    if negated {
        let keyword = keyword(cx, id)?.span;
        cx.overwrite(keyword.start, keyword.end, "while")?;
    }
    let mut hoists = patch_condition(cx, condition, negated, true)?;
    open_clause(cx, cx.outer_span(condition).end, body)?;
    hoists.append(cx.patch(body, Role::Statement)?);
    close_clause(cx, id, body)?;

    cx.set_flag(id, PatcherFlags::BLOCK_STATEMENT);
    Ok(hoists)
}
