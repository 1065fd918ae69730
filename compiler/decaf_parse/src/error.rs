//! Parse errors.

use decaf_diagnostic::{Diagnostic, ErrorCode};
use decaf_ir::{Span, TokenKind};
use decaf_lexer::LexError;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {found}")]
    UnexpectedToken {
        span: Span,
        found: TokenKind,
        expected: &'static str,
    },

    #[error("expected expression, found {found}")]
    ExpectedExpression { span: Span, found: TokenKind },

    #[error("unclosed {open}")]
    UnclosedDelimiter {
        span: Span,
        open: TokenKind,
        found: Span,
    },

    #[error("expected identifier, found {found}")]
    ExpectedIdentifier { span: Span, found: TokenKind },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: Span },

    #[error("{message}")]
    Indentation { span: Span, message: &'static str },

    #[error("`{word}` is not supported")]
    Unsupported { span: Span, word: String },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::ExpectedIdentifier { span, .. }
            | ParseError::InvalidAssignmentTarget { span }
            | ParseError::Indentation { span, .. }
            | ParseError::Unsupported { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.code(),
            ParseError::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseError::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseError::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseError::ExpectedIdentifier { .. } => ErrorCode::E1004,
            ParseError::InvalidAssignmentTarget { .. } => ErrorCode::E1005,
            ParseError::Indentation { .. } => ErrorCode::E1006,
            ParseError::Unsupported { .. } => ErrorCode::E1007,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::UnexpectedToken { span, expected, .. } => {
                diag.with_label(*span, format!("expected {expected}"))
            }
            ParseError::ExpectedExpression { span, .. } => {
                diag.with_label(*span, "expression expected here")
            }
            ParseError::UnclosedDelimiter { span, found, .. } => diag
                .with_label(*found, "expected a closing delimiter here")
                .with_secondary_label(*span, "opened here"),
            ParseError::ExpectedIdentifier { span, .. } => diag.with_label(*span, "not a name"),
            ParseError::InvalidAssignmentTarget { span } => {
                diag.with_label(*span, "cannot assign to this")
            }
            ParseError::Indentation { span, .. } => diag.with_label(*span, "indentation here"),
            ParseError::Unsupported { span, .. } => diag.with_label(*span, "not supported"),
        }
    }
}
