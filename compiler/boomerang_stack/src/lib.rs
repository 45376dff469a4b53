//! Stack growth for the recursive evaluator.
//!
//! Every node the evaluator visits is a Rust call frame: a function body
//! that calls itself, a `when` nested in a `for` nested in a `while`, or a
//! long left-leaning chain of binary expressions all recurse on the native
//! stack. [`ensure_sufficient_stack`] wraps those entry points and moves the
//! evaluation onto a freshly allocated segment when the current one runs low,
//! so script-level recursion is bounded by the configured call depth rather
//! than by the host thread's stack size.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
///
/// A single script-level call walks several evaluator frames (call, block,
/// statement, expression), so segments are sized for a few thousand of them.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
