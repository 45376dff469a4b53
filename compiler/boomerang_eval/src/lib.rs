//! Boomerang Eval - tree-walking evaluator for the Boomerang language.
//!
//! Takes the syntax nodes produced by the parser and evaluates them in order,
//! producing one value per top-level statement.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: node dispatch, calls and loops
//! - `Environment`: arena of lexical scopes; closures keep theirs alive
//! - `ControlFlow`: `break`, `continue` and `return` as values, not errors
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on values
//! - `BuiltinRegistry`: `print`, `unwrap`, `len`, `range`
//! - `PrintHandlerImpl`: where `print` writes
//!
//! Errors are [`EvalError`]s carrying the line of the innermost node that
//! failed.

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;

use boomerang_ir::Node;

pub use builtins::{builtin_names, BuiltinContext, BuiltinFn, BuiltinRegistry};
pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{Environment, Scope, ScopeKind};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use exec::control::{ControlFlow, EvalContext};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::{evaluate_binary, values_equal};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;

/// Evaluate `nodes` with `interpreter`, one result per node.
///
/// Bindings made here stay in the interpreter's global scope.
pub fn evaluate(nodes: &[Node], interpreter: &mut Interpreter) -> Result<Vec<Node>, EvalError> {
    interpreter.evaluate(nodes)
}
