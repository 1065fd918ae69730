//! Lexer for the decaf source language.
//!
//! Produces a [`TokenList`] that keeps trivia (newlines, comments, line
//! continuations) so later stages can rewrite them. Most tokens come
//! straight from the logos automaton in [`raw_token`]; three need context
//! and are finished here:
//!
//! - `/` in operand position starts a regex literal, scanned by hand
//! - `###` not followed by another `#` starts a block comment
//! - a `#{` in a double-quoted string is rejected (no interpolation)
//!
//! After a hand-scanned token the logos lexer is restarted past it.

mod lex_error;
mod raw_token;

use decaf_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;
use tracing::debug;

pub use lex_error::LexError;
use raw_token::RawToken;

/// Tokenize `source`. The list always ends with an `Eof` token.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut tokens = TokenList::new();
    let mut offset = 0usize;

    'restart: loop {
        let mut lexer = RawToken::lexer(&source[offset..]);
        while let Some(result) = lexer.next() {
            let range = lexer.span();
            let start = offset + range.start;
            let end = offset + range.end;
            let span = Span::from_range(start..end);

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => return Err(classify_error(source, start, end)),
            };

            match raw {
                RawToken::Comment if is_block_comment_start(&source[start..end]) => {
                    let close = scan_block_comment(source, start)?;
                    tokens.push(Token::new(
                        TokenKind::HereComment,
                        Span::from_range(start..close),
                    ));
                    offset = close;
                    continue 'restart;
                }
                RawToken::Slash | RawToken::SlashEq if in_operand_position(&tokens) => {
                    let close = scan_regex(source, start)?;
                    tokens.push(Token::new(TokenKind::Regex, Span::from_range(start..close)));
                    offset = close;
                    continue 'restart;
                }
                RawToken::String if source[start..end].starts_with('"') => {
                    if let Some(at) = source[start..end].find("#{") {
                        let at = start + at;
                        return Err(LexError::Interpolation {
                            span: Span::from_range(at..at + 2),
                        });
                    }
                    tokens.push(Token::new(TokenKind::String, span));
                }
                _ => tokens.push(Token::new(raw.kind(), span)),
            }
        }
        break;
    }

    tokens.push(Token::new(TokenKind::Eof, Span::point(source.len() as u32)));
    debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

fn classify_error(source: &str, start: usize, end: usize) -> LexError {
    let ch = source[start..].chars().next().unwrap_or('\0');
    if ch == '"' || ch == '\'' {
        let line_end = source[start..].find('\n').map_or(source.len(), |n| start + n);
        LexError::UnterminatedString {
            span: Span::from_range(start..line_end),
        }
    } else {
        LexError::InvalidCharacter {
            span: Span::from_range(start..end.max(start + ch.len_utf8())),
            ch,
        }
    }
}

/// `###` opens a block comment; `####` and longer runs are line comments.
fn is_block_comment_start(text: &str) -> bool {
    text.starts_with("###") && !text[3..].starts_with('#')
}

/// Returns the offset just past the closing `###`.
fn scan_block_comment(source: &str, start: usize) -> Result<usize, LexError> {
    source[start + 3..]
        .find("###")
        .map(|n| start + 3 + n + 3)
        .ok_or(LexError::UnterminatedBlockComment {
            span: Span::from_range(start..start + 3),
        })
}

/// A `/` starts a regex unless the previous token could end an operand.
/// Newlines count as separators here, so a line may begin with a regex.
fn in_operand_position(tokens: &TokenList) -> bool {
    tokens
        .iter()
        .rev()
        .find(|t| !t.kind.is_parser_trivia())
        .map_or(true, |t| !t.kind.ends_operand())
}

/// Returns the offset just past the regex flags.
fn scan_regex(source: &str, start: usize) -> Result<usize, LexError> {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    let mut in_class = false;
    loop {
        match bytes.get(i) {
            None | Some(b'\n') => {
                return Err(LexError::UnterminatedRegex {
                    span: Span::from_range(start..i),
                })
            }
            Some(b'\\') => i += 2,
            Some(b'[') => {
                in_class = true;
                i += 1;
            }
            Some(b']') => {
                in_class = false;
                i += 1;
            }
            Some(b'/') if !in_class => break,
            Some(_) => i += 1,
        }
    }
    i += 1;
    while bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
        i += 1;
    }
    Ok(i)
}
