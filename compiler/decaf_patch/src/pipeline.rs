//! The two-stage pipeline: parse, normalize, re-parse, main.
//!
//! One call either returns the complete output or one positioned error;
//! there is no partial output.

use std::fmt;
use std::fmt::Write;

use decaf_diagnostic::{snippet, Diagnostic, ErrorCode};
use decaf_parse::ParseError;
use tracing::debug;

use crate::options::{Options, StageName};
use crate::runner::run_stage;
use crate::stages::main::MainStage;
use crate::stages::normalize::NormalizeStage;
use crate::suggestion::Suggestion;

/// A successful transpile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranspileOutput {
    pub code: String,
    /// Informational notes, sorted and deduplicated.
    pub suggestions: Vec<Suggestion>,
}

/// A failed transpile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranspileError {
    /// The stage that failed, or `None` when the input itself did not
    /// parse.
    pub stage: Option<StageName>,
    pub diagnostic: Diagnostic,
    /// The text the diagnostic's spans index: the input, or the normalized
    /// text for failures after normalization.
    pub source: String,
}

impl TranspileError {
    fn new(stage: Option<StageName>, diagnostic: Diagnostic, source: &str) -> Self {
        TranspileError {
            stage,
            diagnostic,
            source: source.to_owned(),
        }
    }

    /// Header, location, and an excerpt of the source with a caret run under
    /// the offending span.
    pub fn render(&self) -> String {
        let diagnostic = &self.diagnostic;
        let mut out = format!(
            "{}[{}]: {}\n",
            diagnostic.severity, diagnostic.code, diagnostic.message
        );
        if let Some(stage) = self.stage {
            let _ = writeln!(out, "  in the {stage} stage");
        }
        if let Some(label) = diagnostic.labels.iter().find(|label| label.is_primary) {
            let _ = writeln!(out, "  --> {}", snippet::location(&self.source, label.span));
            out.push_str(&snippet::render_snippet(
                &self.source,
                label.span,
                &label.message,
            ));
        }
        for note in &diagnostic.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
        out
    }
}

impl fmt::Display for TranspileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.diagnostic.code, self.diagnostic.message)
    }
}

impl std::error::Error for TranspileError {}

/// Normalized text that no longer parses means a normalize rule is wrong.
fn reparse_diagnostic(err: &ParseError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9003)
        .with_message(format!("normalized output does not parse: {err}"))
        .with_label(err.span(), "in the normalized text here")
        .with_note("this is a bug in a normalize rule")
}

/// Transpile `source`, stopping early if `options.run_to_stage` says so.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn transpile(source: &str, options: &Options) -> Result<TranspileOutput, TranspileError> {
    let parsed = decaf_parse::parse(source)
        .map_err(|err| TranspileError::new(None, err.to_diagnostic(), source))?;

    let normalized = run_stage::<NormalizeStage>(source, &parsed, options).map_err(|err| {
        TranspileError::new(Some(StageName::Normalize), err.to_diagnostic(), source)
    })?;
    if options.run_to_stage == Some(StageName::Normalize) {
        return Ok(TranspileOutput {
            code: normalized.code,
            suggestions: normalized.suggestions,
        });
    }

    let reparsed = decaf_parse::parse(&normalized.code).map_err(|err| {
        TranspileError::new(
            Some(StageName::Normalize),
            reparse_diagnostic(&err),
            &normalized.code,
        )
    })?;

    let main = run_stage::<MainStage>(&normalized.code, &reparsed, options).map_err(|err| {
        TranspileError::new(Some(StageName::Main), err.to_diagnostic(), &normalized.code)
    })?;

    let mut suggestions = normalized.suggestions;
    suggestions.extend(main.suggestions);
    suggestions.sort();
    suggestions.dedup();
    debug!(len = main.code.len(), "transpiled");
    Ok(TranspileOutput {
        code: main.code,
        suggestions,
    })
}
