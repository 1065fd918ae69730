//! Operators: renamed spellings, existence checks, chained comparisons and
//! helper-backed operators.

use decaf_ir::{BinaryOperator, NodeId, NodeKind, Role, TokenKind, UnaryOperator};

use super::{parenthesize_if_needed, Cx, MainStage};
use crate::error::PatchResult;
use crate::helpers::{IN_HELPER, MOD_HELPER};
use crate::patcher::{Hoists, PatchCx, RepeatableOptions};
use crate::suggestion::Suggestion;

/// The JavaScript spelling of an operator token, when it differs.
fn js_spelling(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::And => Some("&&"),
        TokenKind::Or => Some("||"),
        TokenKind::Is | TokenKind::EqEq => Some("==="),
        TokenKind::Isnt | TokenKind::NotEq => Some("!=="),
        _ => None,
    }
}

fn is_comparison_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq
            | TokenKind::EqEq
            | TokenKind::NotEq
            | TokenKind::Is
            | TokenKind::Isnt
    )
}

fn spells(op: BinaryOperator, kind: TokenKind) -> bool {
    match op {
        BinaryOperator::And => matches!(kind, TokenKind::And | TokenKind::AmpAmp),
        BinaryOperator::Or => matches!(kind, TokenKind::Or | TokenKind::PipePipe),
        BinaryOperator::Modulo => kind == TokenKind::PercentPercent,
        BinaryOperator::In => kind == TokenKind::In,
        BinaryOperator::Existential => kind == TokenKind::Question,
        _ => is_comparison_token(kind),
    }
}

/// Check that an undeclared name exists without a `ReferenceError`.
fn typeof_check(name: &str) -> String {
    format!("typeof {name} !== 'undefined' && {name} !== null")
}

/// Index of the operator token between two operands.
fn operator_index(
    cx: &PatchCx<'_, MainStage>,
    id: NodeId,
    left: NodeId,
    right: NodeId,
    op: BinaryOperator,
) -> PatchResult<usize> {
    cx.index_of_source_token_between_patchers_matching(left, right, |kind| spells(op, kind))
        .ok_or_else(|| cx.missing_token(id, "operator"))
}

/// Replace an operator token and the whitespace around it with `text`.
fn replace_operator_gap(cx: Cx<'_, '_>, index: usize, text: &str) -> PatchResult<()> {
    let tokens = cx.tokens();
    let operator = tokens[index].span;
    let start = index
        .checked_sub(1)
        .and_then(|i| tokens.previous_semantic_index(i))
        .map_or(operator.start, |i| tokens[i].span.end);
    let end = tokens
        .next_semantic_index(index + 1)
        .map_or(operator.end, |i| tokens[i].span.start);
    cx.remove(start, end)?;
    cx.append_left(start, text)
}

pub(super) fn patch_unary(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::UnaryOp { op, expression } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a unary operator"));
    };
    let hoists = cx.patch(*expression, Role::Expression)?;
    if *op == UnaryOperator::Not {
        let tokens = cx.tokens();
        let index = cx
            .first_token(id)
            .ok_or_else(|| cx.missing_token(id, "`not`"))?;
        let next = tokens
            .next_semantic_index(index + 1)
            .map_or(tokens[index].span.end, |i| tokens[i].span.start);
        cx.remove(tokens[index].span.start, next)?;
        cx.prepend_right(next, "!")?;
    }
    Ok(hoists)
}

pub(super) fn patch_binary(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::BinaryOp { op, left, right } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a binary operator"));
    };
    let (op, left, right) = (*op, *left, *right);
    let mut hoists = cx.patch(left, Role::Expression)?;
    hoists.append(cx.patch(right, Role::Expression)?);

    let helper = match op {
        BinaryOperator::Modulo => MOD_HELPER,
        BinaryOperator::In => IN_HELPER,
        BinaryOperator::And
        | BinaryOperator::Or
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual => {
            let token = cx.tokens()[operator_index(cx, id, left, right, op)?];
            if let Some(spelling) = js_spelling(token.kind) {
                cx.overwrite(token.span.start, token.span.end, spelling)?;
            }
            return Ok(hoists);
        }
        _ => return Ok(hoists),
    };

    // `a %% b` → `__mod__(a, b)`
    let index = operator_index(cx, id, left, right, op)?;
    let name = cx.register_helper(helper)?;
    replace_operator_gap(cx, index, ", ")?;
    let span = cx.span(id);
    cx.prepend_right(span.start, &format!("{name}("))?;
    cx.append_left(span.end, ")")?;
    Ok(hoists)
}

/// `a?` → `a != null`, or a `typeof` check for an undeclared name.
pub(super) fn patch_exists(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::ExistsOp { expression } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected an existence check"));
    };
    let expression = *expression;
    let span = cx.span(id);

    let hoists = match undeclared_name(cx, expression) {
        Some(name) => {
            cx.overwrite(span.start, span.end, &typeof_check(name))?;
            Hoists::new()
        }
        None => {
            let hoists = cx.patch(expression, Role::Expression)?;
            let question = cx
                .last_token(id)
                .and_then(|i| cx.source_token_at_index(i))
                .filter(|token| token.kind == TokenKind::Question)
                .ok_or_else(|| cx.missing_token(id, "`?`"))?;
            cx.overwrite(question.span.start, question.span.end, " != null")?;
            hoists
        }
    };
    parenthesize_if_needed(cx, id)?;
    cx.add_suggestion(Suggestion::NullChecks);
    Ok(hoists)
}

/// `a ? b` → `a != null ? a : b`, evaluating `a` once.
pub(super) fn patch_existential(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::BinaryOp { op, left, right } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected an existential operator"));
    };
    let (op, left, right) = (*op, *left, *right);

    let (reference, mut hoists) = match undeclared_name(cx, left) {
        Some(name) => {
            let span = cx.span(left);
            cx.overwrite(span.start, span.end, &typeof_check(name))?;
            (name.to_owned(), Hoists::new())
        }
        None => {
            let (reference, hoists) =
                cx.patch_repeatable(left, RepeatableOptions::named("left"))?;
            cx.append_left(cx.outer_span(left).end, " != null")?;
            (reference, hoists)
        }
    };
    hoists.append(cx.patch(right, Role::Expression)?);

    let index = operator_index(cx, id, left, right, op)?;
    replace_operator_gap(cx, index, &format!(" ? {reference} : "))?;
    parenthesize_if_needed(cx, id)?;
    cx.add_suggestion(Suggestion::NullChecks);
    Ok(hoists)
}

/// `a < b() < c` → `a < (middle = b()) && middle < c`.
pub(super) fn patch_chained_comparison(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::ChainedComparison { operands } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a chained comparison"));
    };
    let last = operands.len().saturating_sub(1);

    let mut hoists = Hoists::new();
    let mut middles = Vec::new();
    for (i, &operand) in operands.iter().enumerate() {
        if i == 0 || i == last {
            hoists.append(cx.patch(operand, Role::Expression)?);
        } else {
            let (reference, operand_hoists) =
                cx.patch_repeatable(operand, RepeatableOptions::named("middle"))?;
            hoists.append(operand_hoists);
            middles.push((operand, reference));
        }
    }

    for pair in operands.windows(2) {
        let index = cx
            .index_of_source_token_between_patchers_matching(pair[0], pair[1], is_comparison_token)
            .ok_or_else(|| cx.missing_token(id, "comparison operator"))?;
        let token = cx.tokens()[index];
        if let Some(spelling) = js_spelling(token.kind) {
            cx.overwrite(token.span.start, token.span.end, spelling)?;
        }
    }

    for (operand, reference) in middles {
        cx.append_left(cx.outer_span(operand).end, &format!(" && {reference}"))?;
    }
    parenthesize_if_needed(cx, id)?;
    Ok(hoists)
}

/// The name of an identifier nothing in scope declares.
fn undeclared_name<'s>(cx: &PatchCx<'s, MainStage>, id: NodeId) -> Option<&'s str> {
    cx.ast()
        .identifier_name(id)
        .filter(|name| !cx.has_binding(id, name))
}
