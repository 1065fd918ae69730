//! Patch-stage errors.
//!
//! Every variant is fatal for the input being transpiled and carries the
//! range of the stage's source text it concerns.

use decaf_diagnostic::{Diagnostic, ErrorCode};
use decaf_ir::Span;

use crate::edit_buffer::EditError;
use crate::helpers::HelperConflict;

pub type PatchResult<T> = Result<T, PatchError>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// A rewrite rule met a node shape it does not handle.
    #[error("cannot rewrite {node}: {message}")]
    Unsupported {
        span: Span,
        node: &'static str,
        message: String,
    },

    /// A keyword or punctuation token the rule relies on is missing.
    #[error("cannot find {expected} in {node}")]
    MissingToken {
        span: Span,
        node: &'static str,
        expected: &'static str,
    },

    #[error("{node} patched more than once")]
    AlreadyPatched { span: Span, node: &'static str },

    #[error("conflicting edits while rewriting {node}: {source}")]
    Edit {
        span: Span,
        node: &'static str,
        #[source]
        source: EditError,
    },

    #[error("{source}")]
    Helper {
        span: Span,
        #[source]
        source: HelperConflict,
    },

    #[error("no enclosing scope handled {what}")]
    UnhandledHoist { span: Span, what: String },
}

impl PatchError {
    pub fn span(&self) -> Span {
        match self {
            PatchError::Unsupported { span, .. }
            | PatchError::MissingToken { span, .. }
            | PatchError::AlreadyPatched { span, .. }
            | PatchError::Edit { span, .. }
            | PatchError::Helper { span, .. }
            | PatchError::UnhandledHoist { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PatchError::Unsupported { .. }
            | PatchError::MissingToken { .. }
            | PatchError::AlreadyPatched { .. } => ErrorCode::E9001,
            PatchError::Edit { .. } => ErrorCode::E9002,
            PatchError::Helper { .. } => ErrorCode::E9004,
            PatchError::UnhandledHoist { .. } => ErrorCode::E9005,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            PatchError::Edit { source, .. } => diag
                .with_label(self.span(), "while rewriting this")
                .with_secondary_label(source.span(), "conflicting edit"),
            PatchError::Unsupported { .. } | PatchError::MissingToken { .. } => {
                diag.with_label(self.span(), "cannot rewrite this")
            }
            PatchError::AlreadyPatched { .. }
            | PatchError::Helper { .. }
            | PatchError::UnhandledHoist { .. } => diag
                .with_label(self.span(), "here")
                .with_note("this is a bug in a rewrite rule"),
        }
    }
}

#[cfg(test)]
mod tests;
