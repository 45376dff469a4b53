//! Control signals and the context they are legal in.
//!
//! `break`, `continue` and `return` are not errors and are not unwound
//! through Rust panics or `Err`. Every node evaluates to a [`ControlFlow`];
//! blocks stop at the first non-`Value` result and hand it to their caller
//! until a loop or a function call consumes it.

use boomerang_ir::{Node, NodeKind};

use crate::errors::{builtin_shadowing, invalid_assignment_target, EvalError};

/// Outcome of evaluating one node.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    /// Normal completion.
    Value(Node),
    Break,
    Continue,
    /// A `return` on its way to the enclosing call.
    Return(Node),
}

/// Unwrap a [`ControlFlow::Value`], or return any other signal from the
/// enclosing function unchanged.
macro_rules! value {
    ($flow:expr) => {
        match $flow {
            $crate::exec::control::ControlFlow::Value(value) => value,
            signal => return Ok(signal),
        }
    };
}
pub(crate) use value;

/// Which control statements the node being evaluated may execute.
///
/// Threaded by value through evaluation. A loop body sets `in_loop`; a call
/// clears it and sets `in_function`, so a `break` in a function called from
/// a loop is still rejected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalContext {
    pub in_loop: bool,
    pub in_function: bool,
}

impl EvalContext {
    /// Context of top-level statements.
    pub const TOP_LEVEL: EvalContext = EvalContext {
        in_loop: false,
        in_function: false,
    };

    /// Context of a function body.
    pub const FUNCTION_BODY: EvalContext = EvalContext {
        in_loop: false,
        in_function: true,
    };

    #[must_use]
    pub fn enter_loop(self) -> Self {
        EvalContext {
            in_loop: true,
            ..self
        }
    }
}

/// What a loop does after one iteration of its body.
#[derive(Debug, PartialEq)]
pub enum LoopAction {
    /// Iteration completed with a value.
    Next(Node),
    /// Iteration cut short by `continue`.
    Skip,
    Break,
    /// Leave the loop and propagate this `return`.
    Exit(ControlFlow),
}

/// Map an iteration's outcome to the loop's next step.
pub fn to_loop_action(flow: ControlFlow) -> LoopAction {
    match flow {
        ControlFlow::Value(value) => LoopAction::Next(value),
        ControlFlow::Continue => LoopAction::Skip,
        ControlFlow::Break => LoopAction::Break,
        ret @ ControlFlow::Return(_) => LoopAction::Exit(ret),
    }
}

/// Names bound by an assignment or loop target.
///
/// `target` must be an identifier or a list of identifiers, none of them
/// naming a builtin.
pub fn binding_names<'a>(
    target: &'a Node,
    is_builtin: impl Fn(&str) -> bool,
) -> Result<Vec<&'a str>, EvalError> {
    let check = |node: &'a Node| -> Result<&'a str, EvalError> {
        let name = node
            .as_identifier()
            .ok_or_else(|| invalid_assignment_target(node))?;
        if is_builtin(name) {
            return Err(builtin_shadowing(name));
        }
        Ok(name)
    };
    match &target.kind {
        NodeKind::Identifier(_) => Ok(vec![check(target)?]),
        NodeKind::List(targets) => targets.iter().map(check).collect(),
        _ => Err(invalid_assignment_target(target)),
    }
}

/// Spread `value` over `count` targets.
///
/// A non-list value counts as a one-element list. With fewer values than
/// targets the rest receive an empty Monad; with more, the last target
/// receives a list of everything left over.
pub fn destructure(count: usize, value: Node) -> Vec<Node> {
    if count == 0 {
        return Vec::new();
    }
    let line = value.line;
    let mut values = match value.kind {
        NodeKind::List(items) => items,
        _ => vec![value],
    };
    if values.len() <= count {
        values.resize_with(count, || Node::empty_monad().with_line(line));
        return values;
    }
    let rest = values.split_off(count - 1);
    values.push(Node::list(rest).with_line(line));
    values
}
