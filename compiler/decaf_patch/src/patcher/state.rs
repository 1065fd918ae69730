//! Per-node patcher state.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PatcherFlags: u8 {
        /// The node's patch entry point has run.
        const PATCHED = 1 << 0;
        /// The node is the value of its function: emit an explicit return.
        const IMPLICIT_RETURN = 1 << 1;
        /// The node rendered as a braced statement and takes no `;`.
        const BLOCK_STATEMENT = 1 << 2;
    }
}

/// How a node that must be evaluated once but referenced again is
/// rewritten.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RepeatableOptions {
    /// Base name for a temporary, suffixed on collision.
    pub base: &'static str,
    /// Wrap `tmp = expr` in parentheses.
    pub parenthesize: bool,
    /// Use a temporary even for a node that could be repeated verbatim.
    pub force_temporary: bool,
}

impl RepeatableOptions {
    pub const fn named(base: &'static str) -> Self {
        RepeatableOptions {
            base,
            parenthesize: true,
            force_temporary: false,
        }
    }

    #[must_use]
    pub const fn unparenthesized(mut self) -> Self {
        self.parenthesize = false;
        self
    }

    #[must_use]
    pub const fn forced(mut self) -> Self {
        self.force_temporary = true;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct PatcherState {
    pub flags: PatcherFlags,
    /// Set by a parent before patching: patch as a repeatable expression.
    pub repeatable: Option<RepeatableOptions>,
    /// The code later uses should reference, once patched as repeatable.
    pub repeat_code: Option<String>,
}
