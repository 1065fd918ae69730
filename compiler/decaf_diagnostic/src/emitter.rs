//! Diagnostic emitters.
//!
//! The transpiler produces at most one diagnostic per input, so emitters
//! are deliberately small: a trait with one method plus the terminal
//! implementation the command-line driver uses.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    fn flush(&mut self);
}

#[cfg(test)]
mod tests;
