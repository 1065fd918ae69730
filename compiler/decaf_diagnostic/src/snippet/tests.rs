use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_snippet_shows_neighbouring_lines() {
    let source = "a = 1\nb = (c\nd";
    let out = render_snippet(source, Span::new(10, 11), "unclosed `(`");
    assert_eq!(
        out,
        "  |\n1 | a = 1\n2 | b = (c\n  |     ^ unclosed `(`\n3 | d\n"
    );
}

#[test]
fn test_snippet_on_first_line_has_no_line_above() {
    let source = "foo bar\nbaz";
    let out = render_snippet(source, Span::new(4, 7), "here");
    assert_eq!(out, "  |\n1 | foo bar\n  |     ^^^ here\n2 | baz\n");
}

#[test]
fn test_multiline_span_is_clipped_to_first_line() {
    let source = "x = ->\n  y\n";
    let out = render_snippet(source, Span::new(4, 10), "");
    assert!(out.contains("  |     ^^\n"));
}

#[test]
fn test_empty_span_gets_one_caret() {
    let out = render_snippet("abc", Span::point(3), "end");
    assert_eq!(out, "  |\n1 | abc\n  |    ^ end\n");
}

#[test]
fn test_location_is_one_based() {
    assert_eq!(location("a\n  b", Span::new(4, 5)), "2:3");
}
