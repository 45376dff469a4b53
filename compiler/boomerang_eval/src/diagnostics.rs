//! Call-depth tracking and backtraces.
//!
//! Each function or builtin call pushes a [`CallFrame`]; the push fails once
//! the configured depth is reached, which turns runaway recursion into an
//! ordinary evaluation error instead of unbounded memory growth. Errors that
//! leave a call get a snapshot of the stack attached as an [`EvalBacktrace`].

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Depth used when the embedder does not configure one.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// One active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Rendered callee: `func(a, b)` or `builtin print`.
    pub name: String,
    /// Line of the call site.
    pub line: u32,
}

/// Live call stack of the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. The frame is not pushed when the limit is reached; the
    /// error carries the frames that got there.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            let err = recursion_limit_exceeded(self.max_depth).with_line(frame.line);
            return Err(self.attach_backtrace(err));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "pop on an empty call stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Snapshot of the active frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame.name.clone(),
                line: frame.line,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach the current stack to `err`. Errors raised outside any call and
    /// errors that already carry a backtrace are returned unchanged.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}
