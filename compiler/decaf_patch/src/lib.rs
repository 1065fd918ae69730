//! Source-to-source patching from the decaf language to JavaScript.
//!
//! The input is never regenerated from a tree. Each stage parses its input,
//! builds one patcher per syntax node, and lets the patchers record edits
//! (inserts, overwrites, removals) against the original text in an
//! [`EditBuffer`]; rendering the buffer yields the stage's output.
//!
//! Two stages run in sequence:
//!
//! 1. **normalize** rewrites optional forms (postfix conditionals and
//!    loops, `loop`, soaked accesses) into a canonical subset of the source
//!    language;
//! 2. **main** re-parses that text and rewrites it into JavaScript.
//!
//! [`transpile`] runs both.

pub mod edit_buffer;
pub mod error;
pub mod helpers;
pub mod options;
pub mod patcher;
pub mod pipeline;
mod registry;
pub mod runner;
pub mod scope;
pub mod source_utils;
pub mod stages;
pub mod suggestion;

pub use edit_buffer::{EditBuffer, EditError};
pub use error::{PatchError, PatchResult};
pub use options::{ModuleFormat, Options, StageName};
pub use pipeline::{transpile, TranspileError, TranspileOutput};
pub use suggestion::Suggestion;
