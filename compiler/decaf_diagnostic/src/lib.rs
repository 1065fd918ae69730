//! Diagnostics for the decaf transpiler.
//!
//! Every failure in the pipeline, whether the lexer rejects a character, the
//! parser meets an unexpected token, or a patcher cannot find the keyword
//! it needs, ends up as one [`Diagnostic`]: an [`ErrorCode`], a message and
//! a primary [`Label`] pointing at the offending bytes. Rendering with
//! surrounding source lines is done by [`snippet`] and the terminal
//! [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod snippet;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
