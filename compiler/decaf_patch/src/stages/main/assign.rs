//! Assignments: `let` placement, compound and logical assignment, and
//! module rewrites.

use decaf_ir::{LogicalOperator, NodeId, NodeKind, Role};

use super::literals::is_this_shorthand;
use super::{needs_parens, Cx, MainStage};
use crate::error::PatchResult;
use crate::options::ModuleFormat;
use crate::patcher::{Hoist, Hoists, PatchCx, PatcherFlags, RepeatableOptions};
use crate::suggestion::Suggestion;

/// The name an assignment declares, if it is the first assignment of a
/// bare identifier. Names read before the assignment are declared by the
/// enclosing scope's block instead.
fn declared_name<'s>(cx: &PatchCx<'s, MainStage>, id: NodeId, assignee: NodeId) -> Option<&'s str> {
    if cx.is_declaration(id) && !cx.is_read_before_declaration(id) {
        cx.ast().identifier_name(assignee)
    } else {
        None
    }
}

fn parent_is_scope_root(cx: &PatchCx<'_, MainStage>, id: NodeId) -> bool {
    cx.parent(id).is_some_and(|parent| cx.is_scope_root_block(parent))
}

fn is_program_statement(cx: &PatchCx<'_, MainStage>, id: NodeId) -> bool {
    cx.parent(id)
        .and_then(|block| cx.parent(block))
        .is_some_and(|program| matches!(cx.node(program), NodeKind::Program { .. }))
}

pub(super) fn patch_assign(cx: Cx<'_, '_>, id: NodeId, role: Role) -> PatchResult<Hoists> {
    let NodeKind::AssignOp {
        assignee,
        expression,
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected an assignment"));
    };
    let (assignee, expression) = (*assignee, *expression);
    let implicit_return = cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN);
    let top_level_statement = role == Role::Statement
        && !implicit_return
        && parent_is_scope_root(cx, id)
        && !cx.is_surrounded_by_parentheses(id);

    if top_level_statement
        && cx.options().module_format == ModuleFormat::Esm
        && is_program_statement(cx, id)
    {
        if let Some(hoists) = patch_module_statement(cx, id, assignee, expression)? {
            return Ok(hoists);
        }
    }

    let mut hoists = cx.patch(assignee, Role::Expression)?;
    hoists.append(cx.patch(expression, Role::Expression)?);

    if let Some(name) = declared_name(cx, id, assignee) {
        if top_level_statement {
            cx.prepend_right(cx.span(id).start, "let ")?;
        } else {
            hoists.push(Hoist::Declaration(name.to_owned()));
        }
    }
    if role == Role::Expression || implicit_return {
        cx.add_suggestion(Suggestion::InlineAssignments);
    }
    Ok(hoists)
}

/// `a = require('b')` → `import a from 'b'` and `module.exports = x` →
/// `export default x`. `None` when the statement is neither.
fn patch_module_statement(
    cx: Cx<'_, '_>,
    id: NodeId,
    assignee: NodeId,
    expression: NodeId,
) -> PatchResult<Option<Hoists>> {
    let span = cx.span(id);

    if let Some(name) = cx.ast().identifier_name(assignee) {
        let NodeKind::FunctionApplication {
            function,
            arguments,
        } = cx.node(expression)
        else {
            return Ok(None);
        };
        let is_require = cx.ast().identifier_name(*function) == Some("require")
            && !cx.has_binding(*function, "require");
        let [argument] = arguments.as_slice() else {
            return Ok(None);
        };
        let declares = cx.is_declaration(id) && !cx.is_read_before_declaration(id);
        if !is_require || !declares || !matches!(cx.node(*argument), NodeKind::String) {
            return Ok(None);
        }
        let argument = cx.span(*argument);
        cx.overwrite(span.start, argument.start, &format!("import {name} from "))?;
        cx.remove(argument.end, cx.span(expression).end)?;
        return Ok(Some(Hoists::new()));
    }

    if let NodeKind::MemberAccess {
        expression: object,
        member,
    } = cx.node(assignee)
    {
        let is_module_exports = cx.ast().identifier_name(*object) == Some("module")
            && cx.text(*member) == "exports"
            && !cx.has_binding(*object, "module");
        if is_module_exports {
            let hoists = cx.patch(expression, Role::Expression)?;
            cx.overwrite(span.start, cx.span(expression).start, "export default ")?;
            return Ok(Some(hoists));
        }
    }
    Ok(None)
}

/// `a += b`: a declaring compound assignment is always hoisted.
pub(super) fn patch_compound_assign(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::CompoundAssignOp {
        assignee,
        expression,
        ..
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a compound assignment"));
    };
    let (assignee, expression) = (*assignee, *expression);
    let mut hoists = cx.patch(assignee, Role::Expression)?;
    hoists.append(cx.patch(expression, Role::Expression)?);
    if let Some(name) = declared_name(cx, id, assignee) {
        hoists.push(Hoist::Declaration(name.to_owned()));
    }
    Ok(hoists)
}

/// `a ||= b`, `a &&= b`, `a ?= b`.
///
/// As a statement this becomes an `if`; as a value, a short-circuit
/// expression. The assignee is read once and written once, so any object
/// or index it is built from is evaluated once through a temporary.
pub(super) fn patch_logical_assign(cx: Cx<'_, '_>, id: NodeId, role: Role) -> PatchResult<Hoists> {
    let NodeKind::LogicalAssignOp {
        op,
        assignee,
        expression,
    } = cx.node(id)
    else {
        return Err(cx.unsupported(id, "expected a logical assignment"));
    };
    let (op, assignee, expression) = (*op, *assignee, *expression);
    let as_statement = role == Role::Statement && !cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN);

    let (read, write, mut hoists) = patch_assignee(cx, id, assignee)?;
    hoists.append(cx.patch(expression, Role::Expression)?);
    let value = cx.slice_node(expression)?;

    if let Some(name) = declared_name(cx, id, assignee) {
        hoists.push(Hoist::Declaration(name.to_owned()));
    }

    let text = if as_statement {
        let test = match op {
            LogicalOperator::Or => format!("!{read}"),
            LogicalOperator::And => read,
            LogicalOperator::Exist => format!("{read} == null"),
        };
        format!("if ({test}) {{ {write} = {value}; }}")
    } else {
        let text = match op {
            LogicalOperator::Or => format!("{read} || ({write} = {value})"),
            LogicalOperator::And => format!("{read} && ({write} = {value})"),
            LogicalOperator::Exist => {
                format!("{read} != null ? {write} : ({write} = {value})")
            }
        };
        let wrap = needs_parens(cx, id)
            || (op == LogicalOperator::Exist && !cx.is_surrounded_by_parentheses(id));
        if wrap {
            format!("({text})")
        } else {
            text
        }
    };

    let span = cx.span(id);
    cx.remove(span.start, span.end)?;
    cx.prepend_right(span.start, &text)?;

    if as_statement {
        cx.set_flag(id, PatcherFlags::BLOCK_STATEMENT);
    }
    if op == LogicalOperator::Exist {
        cx.add_suggestion(Suggestion::NullChecks);
    }
    Ok(hoists)
}

/// Patch an assignee and return the code to read it and the code to write
/// it.
fn patch_assignee(
    cx: Cx<'_, '_>,
    id: NodeId,
    assignee: NodeId,
) -> PatchResult<(String, String, Hoists)> {
    match cx.node(assignee) {
        NodeKind::Identifier(name) => {
            let hoists = cx.patch(assignee, Role::Expression)?;
            Ok((name.clone(), name.clone(), hoists))
        }
        NodeKind::MemberAccess {
            expression,
            member: member_span,
        } => {
            let member = cx.text(*member_span);
            if is_this_shorthand(cx, *expression, member_span.start) {
                let hoists = cx.patch(assignee, Role::Expression)?;
                let code = cx.slice_node(assignee)?;
                return Ok((code.clone(), code, hoists));
            }
            let (object, hoists) =
                cx.patch_repeatable(*expression, RepeatableOptions::named("base"))?;
            let read = cx.slice_node(assignee)?;
            Ok((read, format!("{object}.{member}"), hoists))
        }
        NodeKind::DynamicMemberAccess { expression, index } => {
            let (object, mut hoists) =
                cx.patch_repeatable(*expression, RepeatableOptions::named("base"))?;
            let (index, index_hoists) =
                cx.patch_repeatable(*index, RepeatableOptions::named("name"))?;
            hoists.append(index_hoists);
            let read = cx.slice_node(assignee)?;
            Ok((read, format!("{object}[{index}]"), hoists))
        }
        _ => Err(cx.unsupported(id, "unsupported logical assignment target")),
    }
}
