//! Statement lists: separators, semicolons, implicit returns and `let`
//! declarations.

use decaf_ir::{NodeId, NodeKind, Role, TokenKind};

use super::Cx;
use crate::error::PatchResult;
use crate::patcher::{Hoists, PatcherFlags};

pub(super) fn patch_block(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::Block { statements, inline } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a block"));
    };
    let scope_root = cx.is_scope_root_block(id);
    let implicit_return = cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN);

    let mut early_reads = if scope_root {
        cx.early_read_declarations(id)
    } else {
        Vec::new()
    };

    let mut hoists = Hoists::new();
    for (i, &statement) in statements.iter().enumerate() {
        let next_start = statements.get(i + 1).map(|&next| cx.outer_span(next).start);
        if implicit_return && next_start.is_none() {
            mark_implicit_return(cx, statement)?;
        }

        let mut statement_hoists = cx.patch(statement, Role::Statement)?;
        let span = cx.outer_span(statement);

        remove_separator(cx, span.end, next_start)?;
        if !cx.has_flag(statement, PatcherFlags::BLOCK_STATEMENT) {
            cx.append_left(span.end, ";")?;
        }

        if scope_root {
            let mut names: Vec<String> = Vec::new();
            early_reads.retain(|&(name, read)| {
                if read.start >= span.end {
                    return true;
                }
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_owned());
                }
                false
            });
            for name in statement_hoists.take_declarations() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            if !names.is_empty() {
                let separator = if *inline {
                    " ".to_owned()
                } else {
                    format!("\n{}", cx.indent(statement))
                };
                let declaration = format!("let {};{separator}", names.join(", "));
                cx.prepend_right(span.start, &declaration)?;
            }
        }
        hoists.append(statement_hoists);
    }
    Ok(hoists)
}

/// Flag the last statement of a function body as its return value.
fn mark_implicit_return(cx: Cx<'_, '_>, statement: NodeId) -> PatchResult<()> {
    match cx.node(statement) {
        NodeKind::Return { .. } | NodeKind::Throw { .. } | NodeKind::Break | NodeKind::Continue => {
            Ok(())
        }
        NodeKind::While { .. } => Err(cx.unsupported(
            statement,
            "a loop cannot be the implicit return value of a function",
        )),
        _ => {
            cx.set_flag(statement, PatcherFlags::IMPLICIT_RETURN);
            Ok(())
        }
    }
}

/// Drop a source `;` directly after a statement; every statement gets its
/// own terminator instead.
fn remove_separator(cx: Cx<'_, '_>, end: u32, next_start: Option<u32>) -> PatchResult<()> {
    let tokens = cx.tokens();
    let Some(index) = tokens.next_semantic_index(tokens.first_index_at_or_after(end)) else {
        return Ok(());
    };
    let token = tokens[index];
    let before_next = next_start.is_none_or(|start| token.span.end <= start);
    if token.kind == TokenKind::Semicolon && before_next {
        cx.remove(token.span.start, token.span.end)?;
    }
    Ok(())
}
