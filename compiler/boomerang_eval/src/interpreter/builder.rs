//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::Interpreter;
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::{CallStack, DEFAULT_MAX_CALL_DEPTH};
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for interpreters with non-default output or limits.
///
/// ```text
/// let output = buffer_handler();
/// let interpreter = InterpreterBuilder::new()
///     .print_handler(output.clone())
///     .max_call_depth(200)
///     .build();
/// ```
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum number of nested calls before evaluation fails.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: Environment::new(),
            builtins: BuiltinRegistry::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
