//! Source excerpts with a caret under the offending span.
//!
//! ```text
//!   |
//! 1 | a = 1
//! 2 | b = (c
//!   |     ^ unclosed `(`
//! 3 | d
//! ```
//!
//! The line before and the line after the span's first line are shown when
//! they exist. Multi-line spans are underlined up to the end of their first
//! line.

use std::fmt::Write;

use decaf_ir::Span;

use crate::span_utils::LineOffsetTable;

/// Render the excerpt for `span`, with `label` after the carets.
pub fn render_snippet(source: &str, span: Span, label: &str) -> String {
    let table = LineOffsetTable::build(source);
    let (line, column) = table.offset_to_line_col(source, span.start);
    let first = line.saturating_sub(1).max(1);
    let last = (line + 1).min(table.line_count() as u32);
    let width = digits(last);

    let mut lines = vec![format!("{:>width$} |", "")];
    for n in first..=last {
        let text = table.line_text(source, n);
        lines.push(format!("{n:>width$} | {text}"));
        if n == line {
            let carets = caret_count(source, &table, span, line);
            let pad = " ".repeat(column as usize - 1);
            lines.push(format!(
                "{:>width$} | {pad}{} {label}",
                "",
                "^".repeat(carets)
            ));
        }
    }

    let mut out = String::new();
    for l in lines {
        let _ = writeln!(out, "{}", l.trim_end());
    }
    out
}

/// `line:column` of the span start, 1-based.
pub fn location(source: &str, span: Span) -> String {
    let (line, column) = LineOffsetTable::build(source).offset_to_line_col(source, span.start);
    format!("{line}:{column}")
}

fn caret_count(source: &str, table: &LineOffsetTable, span: Span, line: u32) -> usize {
    let line_start = table.line_start_offset(line).unwrap_or(0) as usize;
    let line_end = line_start + table.line_text(source, line).len();
    let start = (span.start as usize).min(line_end);
    let end = (span.end as usize).clamp(start, line_end);
    source
        .get(start..end)
        .map_or(0, |s| s.chars().count())
        .max(1)
}

fn digits(n: u32) -> usize {
    n.max(1).to_string().len()
}

#[cfg(test)]
mod tests;
