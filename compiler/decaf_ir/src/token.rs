//! Token stream produced by the lexer.
//!
//! Unlike a parser-only token stream, the list keeps trivia (newlines,
//! comments, line continuations) because the patching stages need to see
//! and rewrite them. Horizontal whitespace is never tokenized.

use std::fmt;

use crate::Span;

/// Closed set of token kinds in the source language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    Number,
    String,
    Regex,

    // Keywords
    If,
    Unless,
    Else,
    Then,
    While,
    Until,
    Loop,
    Return,
    Break,
    Continue,
    Throw,
    And,
    Or,
    Not,
    Is,
    Isnt,
    In,
    Typeof,
    New,
    True,
    False,
    Yes,
    No,
    On,
    Off,
    Null,
    Undefined,
    This,
    /// A word the language reserves but this front end does not support
    /// (`class`, `for`, `switch`, ...).
    Reserved,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PercentPercent,
    StarStar,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    OrEq,
    AndEq,
    QuestionEq,

    // Logic and existence
    Bang,
    AmpAmp,
    PipePipe,
    Question,
    QuestionDot,
    QuestionLBracket,
    QuestionLParen,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Arrow,
    FatArrow,
    At,

    // Trivia
    Newline,
    Comment,
    HereComment,
    Continuation,

    Eof,
}

impl TokenKind {
    /// Newlines, comments and continuations.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Newline
                | TokenKind::Comment
                | TokenKind::HereComment
                | TokenKind::Continuation
        )
    }

    /// Comments and continuations; newlines stay visible to the parser.
    #[inline]
    pub fn is_parser_trivia(self) -> bool {
        self.is_trivia() && self != TokenKind::Newline
    }

    /// Whether a token of this kind can end an operand.
    ///
    /// Used by the lexer to tell a regex literal from a division operator.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Regex
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Yes
                | TokenKind::No
                | TokenKind::On
                | TokenKind::Off
                | TokenKind::Null
                | TokenKind::Undefined
                | TokenKind::This
                | TokenKind::At
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Question
        )
    }

    /// Identifiers and keywords: anything usable as a property name after `.`.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::If
                | TokenKind::Unless
                | TokenKind::Else
                | TokenKind::Then
                | TokenKind::While
                | TokenKind::Until
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Throw
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Is
                | TokenKind::Isnt
                | TokenKind::In
                | TokenKind::Typeof
                | TokenKind::New
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Yes
                | TokenKind::No
                | TokenKind::On
                | TokenKind::Off
                | TokenKind::Null
                | TokenKind::Undefined
                | TokenKind::This
                | TokenKind::Reserved
        )
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Regex => "regex",
            TokenKind::If => "`if`",
            TokenKind::Unless => "`unless`",
            TokenKind::Else => "`else`",
            TokenKind::Then => "`then`",
            TokenKind::While => "`while`",
            TokenKind::Until => "`until`",
            TokenKind::Loop => "`loop`",
            TokenKind::Return => "`return`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Throw => "`throw`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::Is => "`is`",
            TokenKind::Isnt => "`isnt`",
            TokenKind::In => "`in`",
            TokenKind::Typeof => "`typeof`",
            TokenKind::New => "`new`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Yes => "`yes`",
            TokenKind::No => "`no`",
            TokenKind::On => "`on`",
            TokenKind::Off => "`off`",
            TokenKind::Null => "`null`",
            TokenKind::Undefined => "`undefined`",
            TokenKind::This => "`this`",
            TokenKind::Reserved => "reserved word",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::PercentPercent => "`%%`",
            TokenKind::StarStar => "`**`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Eq => "`=`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::SlashEq => "`/=`",
            TokenKind::PercentEq => "`%=`",
            TokenKind::OrEq => "`||=`",
            TokenKind::AndEq => "`&&=`",
            TokenKind::QuestionEq => "`?=`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Question => "`?`",
            TokenKind::QuestionDot => "`?.`",
            TokenKind::QuestionLBracket => "`?[`",
            TokenKind::QuestionLParen => "`?(`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Arrow => "`->`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::At => "`@`",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::HereComment => "block comment",
            TokenKind::Continuation => "line continuation",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token: kind plus the bytes it covers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Randomly indexable token sequence, always terminated by `Eof`.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the token after `index`, if any.
    #[inline]
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.tokens.len()).then_some(next)
    }

    /// Index of the token before `index`, if any.
    #[inline]
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|&i| i < self.tokens.len())
    }

    /// First non-trivia token at or after `index`.
    pub fn next_semantic_index(&self, index: usize) -> Option<usize> {
        (index..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
    }

    /// Last non-trivia token at or before `index`.
    pub fn previous_semantic_index(&self, index: usize) -> Option<usize> {
        let upper = index.min(self.tokens.len().checked_sub(1)?);
        (0..=upper).rev().find(|&i| !self.tokens[i].kind.is_trivia())
    }

    /// Index of the first token whose start is `>= offset`.
    pub fn first_index_at_or_after(&self, offset: u32) -> usize {
        self.tokens.partition_point(|t| t.span.start < offset)
    }

    /// Index of the token that starts exactly at `offset`.
    pub fn index_of_token_starting_at(&self, offset: u32) -> Option<usize> {
        let index = self.first_index_at_or_after(offset);
        self.tokens
            .get(index)
            .filter(|t| t.span.start == offset && t.kind != TokenKind::Eof)
            .map(|_| index)
    }

    /// Index of the token that ends exactly at `offset`.
    pub fn index_of_token_ending_at(&self, offset: u32) -> Option<usize> {
        let index = self.tokens.partition_point(|t| t.span.end < offset);
        self.tokens
            .get(index)
            .filter(|t| t.span.end == offset && !t.span.is_empty())
            .map(|_| index)
    }

    /// Index of the token whose span contains `offset`.
    pub fn index_of_token_containing(&self, offset: u32) -> Option<usize> {
        let index = self.tokens.partition_point(|t| t.span.end <= offset);
        self.tokens
            .get(index)
            .filter(|t| t.span.contains(offset))
            .map(|_| index)
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}
