//! Functions: headers, bodies, implicit returns and parameter prologues.
//!
//! ```text
//! (a, @b, c = 1) -> a      function(a, b, c) { if (c == null) { c = 1; } this.b = b; return a; }
//! => @x                    () => { return this.x; }
//! ```

use decaf_ir::{NodeId, NodeKind, Role, Span, TokenKind};

use super::Cx;
use crate::error::PatchResult;
use crate::patcher::{Hoist, Hoists, PatcherFlags};

pub(super) fn patch_function(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::Function {
        parameters,
        body,
        bound,
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a function"));
    };
    let (body, bound) = (*body, *bound);

    let mut prologue = Hoists::new();
    for &parameter in parameters {
        prologue.append(patch_parameter(cx, parameter)?);
    }
    let mut lines = Vec::new();
    let declarations = prologue.take_declarations();
    if !declarations.is_empty() {
        lines.push(format!("let {};", declarations.join(", ")));
    }
    lines.extend(prologue.take_prologue());

    let span = cx.span(id);
    let after_parameters = parameters.last().map_or(span.start, |&last| cx.span(last).end);
    let body_start = body.map_or(span.end, |body| cx.span(body).start);
    let arrow = cx
        .expect_token_between(id, after_parameters, body_start, "`->` or `=>`", |kind| {
            matches!(kind, TokenKind::Arrow | TokenKind::FatArrow)
        })?
        .span;
    let has_parens = cx
        .first_token(id)
        .and_then(|index| cx.source_token_at_index(index))
        .is_some_and(|token| token.kind == TokenKind::LParen);

    let header = match (bound, has_parens) {
        (false, true) => {
            cx.prepend_right(span.start, "function")?;
            "{"
        }
        (false, false) => "function() {",
        (true, true) => "=> {",
        (true, false) => "() => {",
    };

    let Some(body) = body else {
        let text = if lines.is_empty() {
            format!("{header}}}")
        } else {
            format!("{header} {} }}", lines.join(" "))
        };
        cx.overwrite(arrow.start, arrow.end, &text)?;
        return Ok(prologue);
    };

    cx.overwrite(arrow.start, arrow.end, header)?;
    cx.set_flag(body, PatcherFlags::IMPLICIT_RETURN);
    let mut hoists = prologue;
    hoists.append(cx.patch(body, Role::Statement)?);

    let NodeKind::Block {
        statements, inline, ..
    } = cx.node(body)
    else {
        return Err(cx.unsupported(body, "expected a function body"));
    };
    if let Some(&first) = statements.first() {
        if !lines.is_empty() {
            let separator = if *inline {
                " ".to_owned()
            } else {
                format!("\n{}", cx.indent(first))
            };
            let text: String = lines
                .iter()
                .map(|line| format!("{line}{separator}"))
                .collect();
            cx.prepend_right(cx.outer_span(first).start, &text)?;
        }
    }

    let end = cx.block_outer_span(body).end;
    if *inline {
        cx.append_left(end, " }")?;
    } else {
        let close = format!("\n{}}}", cx.indent(id));
        cx.append_left(end, &close)?;
    }
    Ok(hoists)
}

/// Patch one parameter, returning the prologue statements it needs.
fn patch_parameter(cx: Cx<'_, '_>, parameter: NodeId) -> PatchResult<Hoists> {
    match cx.node(parameter) {
        NodeKind::Identifier(_) => cx.patch(parameter, Role::Expression),
        NodeKind::MemberAccess { member, .. } => {
            let (_, assignment) = patch_this_parameter(cx, parameter, *member)?;
            Ok(Hoists::one(assignment))
        }
        NodeKind::DefaultParam { param, default } => {
            let (param, default) = (*param, *default);
            let mut hoists = cx.patch(default, Role::Expression)?;
            let name = match cx.node(param) {
                NodeKind::Identifier(name) => name.clone(),
                NodeKind::MemberAccess { member, .. } => {
                    let (name, assignment) = patch_this_parameter(cx, param, *member)?;
                    hoists.push(assignment);
                    name
                }
                _ => return Err(cx.unsupported(parameter, "unsupported parameter")),
            };
            if !cx.options().loose_default_params {
                let value = cx.slice_node(default)?;
                cx.remove(cx.span(param).end, cx.outer_span(default).end)?;
                hoists.push(Hoist::DefaultParam(format!(
                    "if ({name} == null) {{ {name} = {value}; }}"
                )));
            }
            Ok(hoists)
        }
        _ => Err(cx.unsupported(parameter, "unsupported parameter")),
    }
}

/// `@x` → a plain parameter, assigned to `this.x` in the prologue.
fn patch_this_parameter(
    cx: Cx<'_, '_>,
    parameter: NodeId,
    member: Span,
) -> PatchResult<(String, Hoist)> {
    let member = cx.text(member);
    let name = cx.claim_free_binding(parameter, member);
    let span = cx.span(parameter);
    cx.overwrite(span.start, span.end, &name)?;
    let assignment = Hoist::ThisAssignment(format!("this.{member} = {name};"));
    Ok((name, assignment))
}
