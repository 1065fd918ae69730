use decaf_lexer::lex;

use super::*;

#[test]
fn test_comments_are_invisible_newlines_are_not() {
    let source = "a # note\nb";
    let tokens = lex(source).unwrap_or_default();
    let mut cursor = Cursor::new(source, &tokens);
    assert_eq!(cursor.advance().kind, TokenKind::Identifier);
    assert_eq!(cursor.advance().kind, TokenKind::Newline);
    assert_eq!(cursor.text(cursor.current()), "b");
}

#[test]
fn test_advance_parks_on_eof() {
    let source = "a";
    let tokens = lex(source).unwrap_or_default();
    let mut cursor = Cursor::new(source, &tokens);
    cursor.advance();
    assert!(cursor.at_eof());
    cursor.advance();
    assert!(cursor.at_eof());
}

#[test]
fn test_adjacency_and_indent() {
    let source = "x\n  a?.b ? c";
    let tokens = lex(source).unwrap_or_default();
    let mut cursor = Cursor::new(source, &tokens);
    cursor.advance();
    cursor.skip_newlines();
    assert_eq!(cursor.line_indent(), 2);
    cursor.advance();
    assert!(cursor.is_adjacent()); // `?.`
    cursor.advance();
    cursor.advance();
    assert!(!cursor.is_adjacent()); // ` ?`
}

#[test]
fn test_matching_paren_lookahead() {
    let source = "(a, (b)) -> c";
    let tokens = lex(source).unwrap_or_default();
    let cursor = Cursor::new(source, &tokens);
    let close = cursor.matching_paren_ahead();
    assert_eq!(close, Some(6));
    assert_eq!(cursor.peek_kind(7), TokenKind::Arrow);
}

#[test]
fn test_mark_and_reset() {
    let source = "a\n\nb";
    let tokens = lex(source).unwrap_or_default();
    let mut cursor = Cursor::new(source, &tokens);
    cursor.advance();
    let mark = cursor.mark();
    cursor.skip_newlines();
    assert_eq!(cursor.text(cursor.current()), "b");
    cursor.reset(mark);
    assert!(cursor.check(TokenKind::Newline));
}
