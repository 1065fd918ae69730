//! The logos-derived tokenizer.
//!
//! Regex literals, block comments and error classification need context
//! logos cannot see, so they are finished by the driver in `lib.rs`.

use decaf_ir::TokenKind;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,

    #[regex(r"\\[ \t]*\n")]
    Continuation,

    #[token("if")]
    If,
    #[token("unless")]
    Unless,
    #[token("else")]
    Else,
    #[token("then")]
    Then,
    #[token("while")]
    While,
    #[token("until")]
    Until,
    #[token("loop")]
    Loop,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("is")]
    Is,
    #[token("isnt")]
    Isnt,
    #[token("in")]
    In,
    #[token("typeof")]
    Typeof,
    #[token("new")]
    New,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("yes")]
    Yes,
    #[token("no")]
    No,
    #[token("on")]
    On,
    #[token("off")]
    Off,
    #[token("null")]
    Null,
    #[token("undefined")]
    Undefined,
    #[token("this")]
    This,

    #[token("class")]
    #[token("extends")]
    #[token("super")]
    #[token("for")]
    #[token("of")]
    #[token("by")]
    #[token("when")]
    #[token("switch")]
    #[token("try")]
    #[token("catch")]
    #[token("finally")]
    #[token("do")]
    #[token("yield")]
    #[token("await")]
    #[token("import")]
    #[token("export")]
    #[token("let")]
    #[token("const")]
    #[token("var")]
    #[token("function")]
    #[token("delete")]
    #[token("instanceof")]
    Reserved,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("%%")]
    PercentPercent,
    #[token("**")]
    StarStar,

    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("||=")]
    OrEq,
    #[token("&&=")]
    AndEq,
    #[token("?=")]
    QuestionEq,

    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("?")]
    Question,
    #[token("?.")]
    QuestionDot,
    #[token("?[")]
    QuestionLBracket,
    #[token("?(")]
    QuestionLParen,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("@")]
    At,
}

impl RawToken {
    pub(crate) fn kind(self) -> TokenKind {
        match self {
            RawToken::Comment => TokenKind::Comment,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Continuation => TokenKind::Continuation,
            RawToken::If => TokenKind::If,
            RawToken::Unless => TokenKind::Unless,
            RawToken::Else => TokenKind::Else,
            RawToken::Then => TokenKind::Then,
            RawToken::While => TokenKind::While,
            RawToken::Until => TokenKind::Until,
            RawToken::Loop => TokenKind::Loop,
            RawToken::Return => TokenKind::Return,
            RawToken::Break => TokenKind::Break,
            RawToken::Continue => TokenKind::Continue,
            RawToken::Throw => TokenKind::Throw,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::Is => TokenKind::Is,
            RawToken::Isnt => TokenKind::Isnt,
            RawToken::In => TokenKind::In,
            RawToken::Typeof => TokenKind::Typeof,
            RawToken::New => TokenKind::New,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Yes => TokenKind::Yes,
            RawToken::No => TokenKind::No,
            RawToken::On => TokenKind::On,
            RawToken::Off => TokenKind::Off,
            RawToken::Null => TokenKind::Null,
            RawToken::Undefined => TokenKind::Undefined,
            RawToken::This => TokenKind::This,
            RawToken::Reserved => TokenKind::Reserved,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::Number => TokenKind::Number,
            RawToken::String => TokenKind::String,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::PercentPercent => TokenKind::PercentPercent,
            RawToken::StarStar => TokenKind::StarStar,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::OrEq => TokenKind::OrEq,
            RawToken::AndEq => TokenKind::AndEq,
            RawToken::QuestionEq => TokenKind::QuestionEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Question => TokenKind::Question,
            RawToken::QuestionDot => TokenKind::QuestionDot,
            RawToken::QuestionLBracket => TokenKind::QuestionLBracket,
            RawToken::QuestionLParen => TokenKind::QuestionLParen,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::FatArrow => TokenKind::FatArrow,
            RawToken::At => TokenKind::At,
        }
    }
}
