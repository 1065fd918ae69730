use pretty_assertions::assert_eq;

use super::*;
use crate::parse;

fn declared_names(source: &str) -> Vec<String> {
    let parsed = parse(source).unwrap_or_else(|e| panic!("{e}"));
    let mut names: Vec<String> = parsed
        .ast
        .ids()
        .filter(|&id| parsed.scopes.is_declaration(id))
        .filter_map(|id| match parsed.ast.kind(id) {
            NodeKind::AssignOp { assignee, .. } => {
                parsed.ast.identifier_name(*assignee).map(str::to_owned)
            }
            _ => None,
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_first_assignment_declares() {
    assert_eq!(declared_names("a = 1\na = 2"), vec!["a"]);
}

#[test]
fn test_functions_see_outer_bindings() {
    let source = "a = 1\nf = (b) ->\n  a = 2\n  c = b";
    assert_eq!(declared_names(source), vec!["a", "c", "f"]);
}

#[test]
fn test_parameters_bind_in_function_scope() {
    let parsed = parse("f = (x, y = z) -> x").unwrap_or_else(|e| panic!("{e}"));
    let function = parsed
        .ast
        .ids()
        .find(|&id| matches!(parsed.ast.kind(id), NodeKind::Function { .. }))
        .unwrap_or_else(|| panic!("no function"));
    let inner = parsed
        .scopes
        .owned_scope(function)
        .unwrap_or_else(|| panic!("function has no scope"));
    assert!(parsed.scopes.scope(inner).bindings.contains("x"));
    assert!(parsed.scopes.scope(inner).bindings.contains("y"));
    assert!(parsed.scopes.scope(inner).references.contains("z"));

    let program = parsed
        .scopes
        .owned_scope(parsed.ast.root())
        .unwrap_or_else(|| panic!("program has no scope"));
    assert!(!parsed.scopes.has_binding(program, "x"));
    assert_eq!(parsed.scopes.scope_of(function), Some(program));
}

#[test]
fn test_this_parameters_bind_nothing() {
    let parsed = parse("f = (@x) ->").unwrap_or_else(|e| panic!("{e}"));
    let function = parsed
        .ast
        .ids()
        .find(|&id| matches!(parsed.ast.kind(id), NodeKind::Function { .. }))
        .unwrap_or_else(|| panic!("no function"));
    let inner = parsed
        .scopes
        .owned_scope(function)
        .unwrap_or_else(|| panic!("function has no scope"));
    assert!(parsed.scopes.scope(inner).bindings.is_empty());
}

#[test]
fn test_object_keys_are_not_references() {
    let parsed = parse("o = {k: v}\np = {s}").unwrap_or_else(|e| panic!("{e}"));
    let program = parsed
        .scopes
        .owned_scope(parsed.ast.root())
        .unwrap_or_else(|| panic!("program has no scope"));
    let references = &parsed.scopes.scope(program).references;
    assert!(references.contains("v"));
    assert!(references.contains("s"));
    assert!(!references.contains("k"));
}

/// Each early-read declaration as `(name, offset of its first read)`.
fn early_reads(source: &str) -> Vec<(String, u32)> {
    let parsed = parse(source).unwrap_or_else(|e| panic!("{e}"));
    let mut reads: Vec<(String, u32)> = parsed
        .scopes
        .early_reads()
        .filter_map(|(declaration, read)| match parsed.ast.kind(declaration) {
            NodeKind::AssignOp { assignee, .. } => parsed
                .ast
                .identifier_name(*assignee)
                .map(|name| (name.to_owned(), parsed.ast.span(read).start)),
            _ => None,
        })
        .collect();
    reads.sort();
    reads
}

fn no_reads() -> Vec<(String, u32)> {
    Vec::new()
}

#[test]
fn test_reads_before_the_declaring_assignment() {
    assert_eq!(early_reads("x?\nx = 1"), vec![("x".to_owned(), 0)]);
    assert_eq!(early_reads("f(a)\ng(a)\na = 1"), vec![("a".to_owned(), 2)]);
    assert_eq!(early_reads("a = 1\nf(a)"), no_reads());
}

#[test]
fn test_reads_inside_the_assigned_value() {
    assert_eq!(early_reads("n = n + 1"), vec![("n".to_owned(), 4)]);
    assert_eq!(early_reads("f = -> f()"), no_reads());
}

#[test]
fn test_reads_from_inner_functions_are_not_early() {
    assert_eq!(early_reads("f = -> x\nx = 1"), no_reads());
}
