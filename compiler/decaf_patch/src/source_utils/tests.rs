use decaf_ir::{Token, TokenList};
use pretty_assertions::assert_eq;

use super::*;

fn whole(source: &str) -> Span {
    Span::new(0, source.len() as u32)
}

#[test]
fn test_trimmed_range_strips_trailing_trivia() {
    let source = "a + b   # note\n  ";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 5));
}

#[test]
fn test_trimmed_range_keeps_hash_inside_strings() {
    let source = "f('#x')  ";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 7));
    let source = "s = \"a#b\" # c";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 9));
}

#[test]
fn test_trimmed_range_keeps_hash_inside_regex() {
    let source = "r = /#+/g # c";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 9));
}

#[test]
fn test_trimmed_range_sees_regexes_after_keywords() {
    let source = "return /#x/  ";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 11));
    let source = "if /#/.test(s) then 1 # c";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 21));
    let source = "x unless /#/.test(s)";
    assert_eq!(trimmed_range(source, whole(source)), whole(source));
}

#[test]
fn test_trimmed_range_divides_after_names_and_numbers() {
    let source = "a / b # c";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 5));
    let source = "total / 2 # per side";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 9));
    let source = "o.return / n # c";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 12));
}

#[test]
fn test_trimmed_range_skips_block_comments() {
    let source = "a ### b ###\n";
    assert_eq!(trimmed_range(source, whole(source)), Span::new(0, 1));
}

#[test]
fn test_trimmed_range_is_identity_on_clean_spans() {
    let source = "x = [1, 2]";
    assert_eq!(trimmed_range(source, whole(source)), whole(source));
    assert_eq!(trimmed_range(source, Span::new(4, 10)), Span::new(4, 10));
}

#[test]
fn test_indent_of() {
    let source = "a\n  b = ->\n\tc";
    assert_eq!(indent_of(source, 0), "");
    assert_eq!(indent_of(source, 6), "  ");
    assert_eq!(indent_of(source, 12), "\t");
    assert_eq!(line_start(source, 6), 2);
}

#[test]
fn test_is_multiline() {
    let source = "a\nb";
    assert!(is_multiline(source, Span::new(0, 3)));
    assert!(!is_multiline(source, Span::new(0, 1)));
}

fn tokens_of(source: &str) -> TokenList {
    decaf_parse::parse(source)
        .unwrap_or_else(|e| panic!("{e}"))
        .tokens
}

fn index_at(tokens: &TokenList, offset: u32) -> usize {
    tokens
        .index_of_token_starting_at(offset)
        .unwrap_or_else(|| panic!("no token at {offset}"))
}

#[test]
fn test_matching_delimiter_index() {
    let source = "f(a, [b], ')', g(c)) + 1";
    let tokens = tokens_of(source);
    let close = matching_delimiter_index(&tokens, index_at(&tokens, 1));
    assert_eq!(close.map(|i| tokens[i].span.start), Some(19));
    let close = matching_delimiter_index(&tokens, index_at(&tokens, 5));
    assert_eq!(close.map(|i| tokens[i].span.start), Some(7));
    assert_eq!(matching_delimiter_index(&tokens, 0), None);
}

#[test]
fn test_matching_delimiter_skips_regexes_and_comments() {
    let source = "x = (/\\)/)";
    let tokens = tokens_of(source);
    let close = matching_delimiter_index(&tokens, index_at(&tokens, 4));
    assert_eq!(close.map(|i| tokens[i].span.start), Some(9));

    let source = "f(a ### ) ###, b)";
    let tokens = tokens_of(source);
    let close = matching_delimiter_index(&tokens, index_at(&tokens, 1));
    assert_eq!(close.map(|i| tokens[i].span.start), Some(16));
}

#[test]
fn test_matching_delimiter_counts_soak_openers() {
    let source = "f?(g(a))";
    let tokens = tokens_of(source);
    let close = matching_delimiter_index(&tokens, index_at(&tokens, 1));
    assert_eq!(close.map(|i| tokens[i].span.start), Some(7));
}

#[test]
fn test_comment_aware_search() {
    let source = "a # then\nthen";
    let tokens: TokenList = [
        Token::new(TokenKind::Identifier, Span::new(0, 1)),
        Token::new(TokenKind::Comment, Span::new(2, 8)),
        Token::new(TokenKind::Newline, Span::new(8, 9)),
        Token::new(TokenKind::Then, Span::new(9, 13)),
        Token::new(TokenKind::Eof, Span::new(13, 13)),
    ]
    .into_iter()
    .collect();
    let comments = CommentRanges::from_tokens(&tokens);
    assert_eq!(comments.index_of(source, "then", whole(source)), Some(9));
    assert_eq!(comments.last_index_of(source, "then", Span::new(0, 8)), None);
    assert!(comments.any_within(Span::new(0, 9)));
    assert!(!comments.any_within(Span::new(8, 13)));
}
