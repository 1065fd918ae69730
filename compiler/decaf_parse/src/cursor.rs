//! Token cursor for the parser.
//!
//! Walks the token list with comments and line continuations filtered out.
//! Newlines stay visible: they separate statements and open blocks.

use decaf_ir::{Token, TokenKind, TokenList};
use tracing::trace;

/// Saved cursor position for backtracking lookahead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Mark(usize);

pub(crate) struct Cursor<'a> {
    source: &'a str,
    tokens: &'a TokenList,
    /// Indices into `tokens` of every token the parser sees.
    visible: Vec<usize>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a TokenList) -> Self {
        let visible = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_parser_trivia())
            .map(|(i, _)| i)
            .collect();
        Cursor {
            source,
            tokens,
            visible,
            pos: 0,
        }
    }

    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    /// The current token. Parked on `Eof` once the stream is exhausted.
    pub(crate) fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn peek_kind(&self, ahead: usize) -> TokenKind {
        self.token_at(self.pos + ahead).kind
    }

    fn token_at(&self, pos: usize) -> Token {
        let last = self.visible.len().saturating_sub(1);
        self.visible
            .get(pos.min(last))
            .and_then(|&i| self.tokens.get(i))
            .copied()
            .unwrap_or(Token::new(
                TokenKind::Eof,
                decaf_ir::Span::point(self.source.len() as u32),
            ))
    }

    pub(crate) fn text(&self, token: Token) -> &'a str {
        token.span.text(self.source)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        trace!(kind = ?token.kind, span = ?token.span, "advance");
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub(crate) fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Start offset of the current token.
    pub(crate) fn current_start(&self) -> u32 {
        self.current().span.start
    }

    /// End offset of the most recently consumed token.
    pub(crate) fn prev_end(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .map_or(0, |p| self.token_at(p).span.end)
    }

    /// Whether the current token touches the previous one (no whitespace).
    pub(crate) fn is_adjacent(&self) -> bool {
        self.pos > 0 && self.current_start() == self.prev_end()
    }

    /// Column of the current token within its line.
    pub(crate) fn line_indent(&self) -> u32 {
        let start = self.current_start() as usize;
        let line_start = self.source[..start].rfind('\n').map_or(0, |n| n + 1);
        self.source[line_start..start].chars().count() as u32
    }

    /// Position of the `)` matching the `(` under the cursor, as a lookahead
    /// offset from the current token.
    pub(crate) fn matching_paren_ahead(&self) -> Option<usize> {
        let mut depth = 0usize;
        for ahead in 0.. {
            match self.peek_kind(ahead) {
                TokenKind::LParen | TokenKind::QuestionLParen => depth += 1,
                TokenKind::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(ahead);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests;
