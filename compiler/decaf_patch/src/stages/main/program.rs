//! Program: comment syntax, continuations, and helper injection.

use decaf_ir::{NodeId, NodeKind, Role, TokenKind};

use super::Cx;
use crate::error::PatchResult;
use crate::patcher::Hoists;

pub(super) fn patch_program(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let NodeKind::Program { body } = cx.node(id) else {
        return Err(cx.unsupported(id, "expected a program"));
    };
    rewrite_trivia(cx)?;
    let hoists = cx.patch(*body, Role::Statement)?;
    append_helpers(cx)?;
    Ok(hoists)
}

/// `# x` → `// x`, `### x ###` → `/* x */`, and line continuations dropped
/// down to their newline.
fn rewrite_trivia(cx: Cx<'_, '_>) -> PatchResult<()> {
    for token in cx.tokens().iter() {
        let span = token.span;
        match token.kind {
            TokenKind::Comment => cx.overwrite(span.start, span.start + 1, "//")?,
            TokenKind::HereComment if span.len() >= 6 => {
                cx.overwrite(span.start, span.start + 3, "/*")?;
                cx.overwrite(span.end - 3, span.end, "*/")?;
            }
            TokenKind::Continuation => {
                if span.len() > 1 {
                    cx.remove(span.start, span.end - 1)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Each registered helper once, after the program, separated by blank
/// lines.
fn append_helpers(cx: Cx<'_, '_>) -> PatchResult<()> {
    if cx.helpers().is_empty() {
        return Ok(());
    }
    let source = cx.source();
    let mut text = String::new();
    if !source.ends_with('\n') {
        text.push('\n');
    }
    for code in cx.helpers().iter() {
        text.push('\n');
        text.push_str(code);
        text.push('\n');
    }
    cx.append_left(source.len() as u32, &text)
}
