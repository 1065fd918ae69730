//! Stack growth for deeply nested input.
//!
//! Both the parser and the patch traversal recurse once per level of source
//! nesting. Wrapping each recursive step in [`ensure_sufficient_stack`] lets
//! pathological inputs (hundreds of nested parentheses or soak chains) run
//! on a grown stack segment instead of overflowing the thread stack.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// On wasm the engine owns the stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
