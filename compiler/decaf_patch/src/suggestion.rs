//! Informational notes attached to a successful transpile.

use std::fmt;

/// Cleanup the output may want, identified by a stable code.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Suggestion {
    /// Implicit returns were made explicit.
    ImplicitReturns,
    /// An assignment is used as an expression.
    InlineAssignments,
    /// Existence checks were expanded to explicit null checks.
    NullChecks,
}

impl Suggestion {
    pub fn code(self) -> &'static str {
        match self {
            Suggestion::ImplicitReturns => "DS102",
            Suggestion::InlineAssignments => "DS104",
            Suggestion::NullChecks => "DS207",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Suggestion::ImplicitReturns => {
                "Remove unnecessary code created because of implicit returns"
            }
            Suggestion::InlineAssignments => "Avoid inline assignments",
            Suggestion::NullChecks => "Consider shorter variations of null checks",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
