//! Runs one stage over a parse and renders the result.

use decaf_ir::Role;
use decaf_parse::Parsed;
use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::options::Options;
use crate::patcher::{PatchCx, Stage};
use crate::suggestion::Suggestion;

/// Rendered text of one stage plus the suggestions it produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageOutput {
    pub code: String,
    pub suggestions: Vec<Suggestion>,
}

/// Build the patcher tree for `parsed`, patch from the program root, and
/// render the edit buffer. `source` must be the text `parsed` came from.
#[tracing::instrument(level = "debug", skip_all, fields(stage = %S::NAME, len = source.len()))]
pub fn run_stage<S: Stage>(
    source: &str,
    parsed: &Parsed,
    options: &Options,
) -> PatchResult<StageOutput> {
    let mut cx = PatchCx::<S>::new(source, parsed, options);
    let root = parsed.ast.root();

    let hoists = cx.patch(root, Role::Statement)?;
    if let Some(hoist) = hoists.first() {
        return Err(PatchError::UnhandledHoist {
            span: cx.span(root),
            what: hoist.describe().to_owned(),
        });
    }

    let code = cx.render()?;
    let suggestions = cx.take_suggestions();
    debug!(len = code.len(), suggestions = suggestions.len(), "stage finished");
    Ok(StageOutput { code, suggestions })
}
