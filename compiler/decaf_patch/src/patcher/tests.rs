use super::*;
use crate::stages::main::MainStage;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Parsed {
    decaf_parse::parse(source).unwrap_or_else(|e| panic!("{e}"))
}

fn find(parsed: &Parsed, source: &str, text: &str, pred: fn(&NodeKind) -> bool) -> NodeId {
    parsed
        .ast
        .ids()
        .find(|&id| pred(parsed.ast.kind(id)) && parsed.ast.span(id).text(source) == text)
        .unwrap_or_else(|| panic!("no node for {text:?}"))
}

fn identifier(parsed: &Parsed, source: &str, name: &str) -> NodeId {
    find(parsed, source, name, |kind| {
        matches!(kind, NodeKind::Identifier(_))
    })
}

#[test]
fn test_patching_a_node_twice_is_an_error() {
    let source = "a";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");

    assert!(cx.patch(a, Role::Expression).is_ok_and(|h| h.is_empty()));
    let err = cx.patch(a, Role::Expression);
    assert!(matches!(
        err,
        Err(PatchError::AlreadyPatched {
            node: "Identifier",
            ..
        })
    ));
}

#[test]
fn test_outer_span_widens_over_every_paren_pair() {
    let source = "x = ((a)) + b";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");
    let b = identifier(&parsed, source, "b");

    assert!(cx.is_surrounded_by_parentheses(a));
    assert_eq!(cx.text(cx.outer_span(a)), "((a))");
    assert!(!cx.is_surrounded_by_parentheses(b));
    assert_eq!(cx.outer_span(b), cx.span(b));
}

#[test]
fn test_unmatched_parens_do_not_surround() {
    let source = "x = (a) + (b)";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let sum = parsed
        .ast
        .ids()
        .find(|&id| matches!(parsed.ast.kind(id), NodeKind::BinaryOp { .. }))
        .unwrap_or_else(|| panic!("no binary operation"));

    assert!(!cx.is_surrounded_by_parentheses(sum));
}

#[test]
fn test_parens_inside_regexes_and_comments_are_not_counted() {
    let source = "x = (/\\)/)\ny = (c ### ) ###)";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let regex = find(&parsed, source, "/\\)/", |kind| matches!(kind, NodeKind::Regex));
    let c = identifier(&parsed, source, "c");

    assert!(cx.is_surrounded_by_parentheses(regex));
    assert_eq!(cx.text(cx.outer_span(regex)), "(/\\)/)");
    assert!(cx.is_surrounded_by_parentheses(c));
    assert_eq!(cx.text(cx.outer_span(c)), "(c ### ) ###)");
}

#[test]
fn test_semantic_token_neighbors_skip_trivia() {
    let source = "f(a, # note\n  b)";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");
    let b = identifier(&parsed, source, "b");

    let after_a = cx.next_semantic_token(a).map(|t| t.kind);
    assert_eq!(after_a, Some(TokenKind::Comma));
    let before_b = cx.previous_semantic_token(b).map(|t| t.kind);
    assert_eq!(before_b, Some(TokenKind::Comma));
}

#[test]
fn test_extract_temporary_repeats_simple_nodes() {
    let source = "a";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");

    let (code, hoists) = cx
        .patch_repeatable(a, RepeatableOptions::named("ref"))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(code, "a");
    assert!(hoists.is_empty());
    assert_eq!(cx.render().unwrap_or_else(|e| panic!("{e}")), "a");
}

#[test]
fn test_extract_temporary_captures_forced_nodes() {
    let source = "a";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");

    let (code, hoists) = cx
        .patch_repeatable(a, RepeatableOptions::named("a").forced())
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(code, "a1");
    assert_eq!(hoists.first(), Some(&Hoist::Declaration("a1".to_owned())));
    assert_eq!(cx.render().unwrap_or_else(|e| panic!("{e}")), "(a1 = a)");
}

#[test]
fn test_extract_temporary_without_parens() {
    let source = "f()";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let call = find(&parsed, source, "f()", |kind| {
        matches!(kind, NodeKind::FunctionApplication { .. })
    });

    let (code, _) = cx
        .patch_repeatable(call, RepeatableOptions::named("value").unparenthesized())
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(code, "value");
    assert_eq!(cx.render().unwrap_or_else(|e| panic!("{e}")), "value = f()");
}

#[test]
fn test_claimed_bindings_are_unique_per_scope() {
    let source = "ref = 1";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let root = parsed.ast.root();

    assert_eq!(cx.claim_free_binding(root, "ref"), "ref1");
    assert_eq!(cx.claim_free_binding(root, "ref"), "ref2");
    assert!(cx.has_binding(root, "ref2"));
}

#[test]
fn test_suggestions_are_sorted_and_deduplicated() {
    let source = "a";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);

    cx.add_suggestion(Suggestion::NullChecks);
    cx.add_suggestion(Suggestion::ImplicitReturns);
    cx.add_suggestion(Suggestion::NullChecks);
    assert_eq!(
        cx.take_suggestions(),
        vec![Suggestion::ImplicitReturns, Suggestion::NullChecks]
    );
    assert!(cx.take_suggestions().is_empty());
}

#[test]
fn test_edit_conflicts_carry_the_current_node() {
    let source = "abc";
    let parsed = parse(source);
    let options = Options::default();
    let mut cx = PatchCx::<MainStage>::new(source, &parsed, &options);

    assert!(cx.overwrite(0, 2, "x").is_ok());
    let err = cx.overwrite(1, 3, "y");
    assert!(matches!(err, Err(PatchError::Edit { .. })));
}

#[test]
fn test_expect_token_between_names_what_is_missing() {
    let source = "a + b";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let a = identifier(&parsed, source, "a");

    let plus = cx.expect_token_between(a, 0, 5, "`+`", |kind| kind == TokenKind::Plus);
    assert_eq!(plus.map(|t| t.span), Ok(Span::new(2, 3)));

    let missing = cx.expect_token_between(a, 0, 5, "`-`", |kind| kind == TokenKind::Minus);
    assert!(matches!(
        missing,
        Err(PatchError::MissingToken { expected: "`-`", .. })
    ));
}

#[test]
fn test_layout_queries() {
    let source = "f = ->\n  a()\n  b()\n";
    let parsed = parse(source);
    let options = Options::default();
    let cx = PatchCx::<MainStage>::new(source, &parsed, &options);
    let function = parsed
        .ast
        .ids()
        .find(|&id| matches!(parsed.ast.kind(id), NodeKind::Function { .. }))
        .unwrap_or_else(|| panic!("no function"));
    let call = find(&parsed, source, "b()", |kind| {
        matches!(kind, NodeKind::FunctionApplication { .. })
    });

    assert!(cx.is_multiline(function));
    assert!(!cx.is_multiline(call));
    assert_eq!(cx.indent(call), "  ");
    assert_eq!(cx.indent(function), "");
    assert_eq!(cx.trimmed_span(call), cx.span(call));
}
