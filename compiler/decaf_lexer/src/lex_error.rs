//! Lexer errors.

use decaf_diagnostic::{Diagnostic, ErrorCode};
use decaf_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("invalid character `{ch}`")]
    InvalidCharacter { span: Span, ch: char },
    #[error("unterminated regex literal")]
    UnterminatedRegex { span: Span },
    #[error("unterminated block comment")]
    UnterminatedBlockComment { span: Span },
    #[error("string interpolation is not supported")]
    Interpolation { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidCharacter { span, .. }
            | LexError::UnterminatedRegex { span }
            | LexError::UnterminatedBlockComment { span }
            | LexError::Interpolation { span } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString { .. } => ErrorCode::E0001,
            LexError::InvalidCharacter { .. } => ErrorCode::E0002,
            LexError::UnterminatedRegex { .. } => ErrorCode::E0003,
            LexError::UnterminatedBlockComment { .. } => ErrorCode::E0004,
            LexError::Interpolation { .. } => ErrorCode::E0005,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            LexError::UnterminatedString { .. } => "string starts here",
            LexError::InvalidCharacter { .. } => "not valid here",
            LexError::UnterminatedRegex { .. } => "regex starts here",
            LexError::UnterminatedBlockComment { .. } => "comment starts here",
            LexError::Interpolation { .. } => "interpolated string",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), label);
        match self {
            LexError::Interpolation { .. } => {
                diag.with_note("use a single-quoted string or concatenate with `+`")
            }
            _ => diag,
        }
    }
}
