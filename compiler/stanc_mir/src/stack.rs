//! Stack growth for recursive rewrites.
//!
//! The generic traversals in [`crate::Expr`] are iterative. Rewrites that
//! need to look at several levels at once (and so recurse by hand) wrap each
//! step in [`ensure_sufficient_stack`], which grows the stack on demand so
//! that deeply nested parenthesized input cannot overflow it.

/// Grow when less than this much stack remains.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first allocating a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
