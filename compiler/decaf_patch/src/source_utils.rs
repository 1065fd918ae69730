//! Pure queries over source text and the token list.
//!
//! Everything here takes positions in the text being patched (the original
//! text of the current stage, never partially patched output).

use decaf_ir::{Span, TokenKind, TokenList};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ScanState {
    Code,
    Str(u8),
    Regex { in_class: bool },
    LineComment,
    BlockComment,
}

/// Keywords after which an operand is expected.
const OPERAND_KEYWORDS: &[&[u8]] = &[
    b"return", b"if", b"unless", b"and", b"or", b"not", b"is", b"isnt", b"then", b"else",
    b"while", b"until", b"when", b"in", b"of", b"typeof", b"new", b"delete", b"throw",
    b"instanceof", b"switch", b"for", b"by", b"yield", b"await", b"loop", b"do",
];

fn is_word_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

/// Whether a `/` after the code byte at `prev` starts a regex rather than a
/// division. Words other than operand keywords (and property names after a
/// `.`) end an operand.
fn regex_may_follow(bytes: &[u8], floor: usize, prev: Option<usize>) -> bool {
    let Some(at) = prev else {
        return true;
    };
    let c = bytes[at];
    if is_word_byte(c) {
        let mut word_start = at;
        while word_start > floor && is_word_byte(bytes[word_start - 1]) {
            word_start -= 1;
        }
        let after_dot = word_start > floor && bytes[word_start - 1] == b'.';
        return !after_dot && OPERAND_KEYWORDS.contains(&&bytes[word_start..=at]);
    }
    matches!(
        c,
        b'(' | b',' | b'=' | b':' | b'[' | b'!' | b'&' | b'|' | b'?' | b'{' | b'}' | b';'
            | b'+' | b'-' | b'*' | b'%' | b'<' | b'>' | b'~' | b'^'
    )
}

/// Whether the bytes after a backslash end its line with only blanks.
fn is_continuation(rest: &[u8]) -> bool {
    rest.iter().find(|b| **b != b' ' && **b != b'\t') == Some(&b'\n')
}

/// `span` with trailing whitespace and comments stripped.
///
/// Scans forward from the start, so `#` inside a string or regex literal is
/// never mistaken for a comment.
pub fn trimmed_range(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();
    let start = span.start as usize;
    let end = (span.end as usize).min(bytes.len());
    let mut state = ScanState::Code;
    let mut last_significant = start;
    let mut prev_code: Option<usize> = None;
    let mut i = start;

    while i < end {
        let c = bytes[i];
        match state {
            ScanState::Code => match c {
                b' ' | b'\t' | b'\r' | b'\n' => {}
                b'#' => {
                    let rest = &bytes[i..end];
                    state = if rest.starts_with(b"###") && !rest.starts_with(b"####") {
                        i += 2;
                        ScanState::BlockComment
                    } else {
                        ScanState::LineComment
                    };
                }
                b'\'' | b'"' => {
                    state = ScanState::Str(c);
                    last_significant = i + 1;
                }
                b'/' if regex_may_follow(bytes, start, prev_code) => {
                    state = ScanState::Regex { in_class: false };
                    last_significant = i + 1;
                }
                b'\\' if is_continuation(&bytes[i + 1..end]) => {}
                _ => {
                    prev_code = Some(i);
                    last_significant = i + 1;
                }
            },
            ScanState::Str(quote) => {
                last_significant = i + 1;
                if c == b'\\' {
                    i += 1;
                    last_significant = (i + 1).min(end);
                } else if c == quote {
                    state = ScanState::Code;
                    prev_code = Some(i);
                }
            }
            ScanState::Regex { in_class } => {
                last_significant = i + 1;
                match c {
                    b'\\' => {
                        i += 1;
                        last_significant = (i + 1).min(end);
                    }
                    b'[' => state = ScanState::Regex { in_class: true },
                    b']' => state = ScanState::Regex { in_class: false },
                    b'/' if !in_class => {
                        state = ScanState::Code;
                        prev_code = Some(i);
                    }
                    _ => {}
                }
            }
            ScanState::LineComment => {
                if c == b'\n' {
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment => {
                if bytes[i..end].starts_with(b"###") {
                    i += 2;
                    state = ScanState::Code;
                }
            }
        }
        i += 1;
    }

    Span::new(span.start, last_significant as u32)
}

/// Byte offset of the start of the line containing `offset`.
pub fn line_start(source: &str, offset: u32) -> u32 {
    let offset = (offset as usize).min(source.len());
    source[..offset].rfind('\n').map_or(0, |n| n as u32 + 1)
}

/// The run of spaces and tabs at the start of the line containing `offset`.
pub fn indent_of(source: &str, offset: u32) -> &str {
    let start = line_start(source, offset) as usize;
    let rest = &source[start..];
    let len = rest
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &rest[..len]
}

/// Whether a newline occurs strictly within `span`.
pub fn is_multiline(source: &str, span: Span) -> bool {
    source
        .get(span.to_range())
        .is_some_and(|text| text.contains('\n'))
}

/// Closing token kind for an opening bracket, soak openers included.
fn closer_of(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen | TokenKind::QuestionLParen => Some(TokenKind::RParen),
        TokenKind::LBracket | TokenKind::QuestionLBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

/// Index of the token closing the bracket at `open`. Brackets inside
/// strings, regexes and comments are single tokens and never counted.
/// `None` when unbalanced or not an opener.
pub fn matching_delimiter_index(tokens: &TokenList, open: usize) -> Option<usize> {
    let close = closer_of(tokens.get(open)?.kind)?;
    let mut depth = 0usize;
    for index in open..tokens.len() {
        let kind = tokens[index].kind;
        if closer_of(kind) == Some(close) {
            depth += 1;
        } else if kind == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Spans of every comment in a token list, for comment-aware text search.
#[derive(Clone, Debug, Default)]
pub struct CommentRanges {
    spans: Vec<Span>,
}

impl CommentRanges {
    pub fn from_tokens(tokens: &TokenList) -> Self {
        let spans = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Comment | TokenKind::HereComment))
            .map(|t| t.span)
            .collect();
        CommentRanges { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether `offset` falls inside a comment.
    pub fn contains(&self, offset: u32) -> bool {
        self.spans.iter().any(|s| s.contains(offset))
    }

    /// Whether any comment lies within `span`.
    pub fn any_within(&self, span: Span) -> bool {
        self.spans
            .iter()
            .any(|s| s.start >= span.start && s.end <= span.end)
    }

    /// First occurrence of `needle` in `range` that does not start inside a
    /// comment.
    pub fn index_of(&self, source: &str, needle: &str, range: Span) -> Option<u32> {
        let text = source.get(range.to_range())?;
        text.match_indices(needle)
            .map(|(i, _)| range.start + i as u32)
            .find(|&at| !self.contains(at))
    }

    /// Last occurrence of `needle` in `range` that does not start inside a
    /// comment.
    pub fn last_index_of(&self, source: &str, needle: &str, range: Span) -> Option<u32> {
        let text = source.get(range.to_range())?;
        text.rmatch_indices(needle)
            .map(|(i, _)| range.start + i as u32)
            .find(|&at| !self.contains(at))
    }
}

#[cfg(test)]
mod tests;
