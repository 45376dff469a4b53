//! Evaluation errors.
//!
//! `EvalErrorKind` is the typed category of a failure; factory functions
//! build an [`EvalError`] from a kind and fill in the message from the kind's
//! `Display`. Factories never know the source line. The evaluator attaches
//! the line of the innermost node being evaluated when the error passes back
//! through it (see [`EvalError::located`]).

use std::fmt;

use boomerang_ir::{Node, Operator};

/// Result of evaluating an expression to a value.
pub type EvalResult = Result<Node, EvalError>;

/// Statement kinds whose legality depends on the enclosing context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlStatement {
    Break,
    Continue,
    Return,
}

impl ControlStatement {
    fn keyword(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Return => "return",
        }
    }
}

/// Whether an operator appeared in unary or binary position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperatorPosition {
    Unary,
    Binary,
}

/// Typed error category.
///
/// Operands are stored already described (`Kind ("literal")`) so the error
/// does not keep evaluated values alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Bindings
    UndefinedVariable {
        name: String,
    },
    InvalidAssignmentTarget {
        target: String,
    },
    BuiltinShadowing {
        name: String,
    },

    // Arithmetic
    CannotConvertToNumber {
        text: String,
    },
    CannotAddTypes {
        left: String,
        right: String,
    },
    CannotSubtractTypes {
        left: String,
        right: String,
    },
    CannotMultiplyTypes {
        left: String,
        right: String,
    },
    CannotDivideTypes {
        left: String,
        right: String,
    },
    CannotModuloTypes {
        left: String,
        right: String,
    },
    DivideByZero,
    NumericOverflow {
        op: Operator,
    },

    // Comparison, logic and collections
    InvalidTypeForOrdering {
        left: String,
        right: String,
    },
    InvalidLogicalOperands {
        op: Operator,
        left: String,
        right: String,
    },
    InvalidMembershipOperands {
        left: String,
        right: String,
    },
    InvalidSendOperands {
        left: String,
        right: String,
    },
    NonIntegerIndex,
    IndexOutOfRange {
        index: i64,
        len: usize,
    },
    InvalidIndexOperands {
        left: String,
        right: String,
    },

    // Operators
    InvalidUnaryOperand {
        operator: &'static str,
        operand: String,
    },
    InvalidOperator {
        position: OperatorPosition,
        op: Operator,
    },

    // Calls
    NotCallable {
        callee: String,
    },
    /// `name` is empty for user functions.
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    MissingParameterValue {
        name: String,
        needed: usize,
    },
    RecursionLimitExceeded {
        limit: usize,
    },
    InvalidBuiltinArgument {
        builtin: String,
        reason: String,
    },

    // Control flow
    ControlFlowOutsideContext {
        statement: ControlStatement,
    },
    InvalidConditionType {
        got: String,
    },
    InvalidIterable {
        got: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Bindings
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::InvalidAssignmentTarget { target } => {
                write!(f, "invalid type for assignment: {target}")
            }
            Self::BuiltinShadowing { name } => {
                write!(f, "\"{name}\" is a builtin function or variable")
            }

            // Arithmetic
            Self::CannotConvertToNumber { text } => {
                write!(f, "cannot convert \"{text}\" to a number")
            }
            Self::CannotAddTypes { left, right } => {
                write!(f, "cannot add types {left} and {right}")
            }
            Self::CannotSubtractTypes { left, right } => {
                write!(f, "cannot subtract types {left} and {right}")
            }
            Self::CannotMultiplyTypes { left, right } => {
                write!(f, "cannot multiply types {left} and {right}")
            }
            Self::CannotDivideTypes { left, right } => {
                write!(f, "cannot divide types {left} and {right}")
            }
            Self::CannotModuloTypes { left, right } => {
                write!(f, "cannot modulo types {left} and {right}")
            }
            Self::DivideByZero => write!(f, "cannot divide by zero"),
            Self::NumericOverflow { op } => {
                write!(f, "result of {op} is not a finite number")
            }

            // Comparison, logic and collections
            Self::InvalidTypeForOrdering { left, right } => {
                write!(f, "invalid types for comparison: {left} and {right}")
            }
            Self::InvalidLogicalOperands { op, left, right } => {
                write!(f, "cannot use {} on types {left} and {right}", op.as_symbol())
            }
            Self::InvalidMembershipOperands { left, right } => {
                write!(f, "invalid types for in: {left} and {right}")
            }
            Self::InvalidSendOperands { left, right } => {
                write!(f, "cannot use send on types {left} and {right}")
            }
            Self::NonIntegerIndex => write!(f, "list index must be an integer"),
            Self::IndexOutOfRange { index, len } => {
                // An empty sequence reports `(0 to -1)`.
                let last = i128::try_from(*len).map_or(i128::MAX, |len| len - 1);
                write!(f, "index of {index} out of range (0 to {last})")
            }
            Self::InvalidIndexOperands { left, right } => {
                write!(f, "invalid types for index: {left} and {right}")
            }

            // Operators
            Self::InvalidUnaryOperand { operator, operand } => {
                write!(f, "invalid type for {operator} operator: {operand}")
            }
            Self::InvalidOperator { position, op } => {
                let position = match position {
                    OperatorPosition::Unary => "unary",
                    OperatorPosition::Binary => "binary",
                };
                write!(f, "invalid {position} operator: {op}")
            }

            // Calls
            Self::NotCallable { callee } => {
                write!(f, "cannot make function call on type {callee}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                if name.is_empty() {
                    write!(f, "expected {expected} arguments, got {got}")
                } else {
                    write!(f, "{name} expects {expected} arguments, got {got}")
                }
            }
            Self::MissingParameterValue { name, needed } => write!(
                f,
                "Function paramter \"{name}\" does not have a value. \
                 Either add {needed} more values to the function call or assign \"{name}\" \
                 a default value in the function definition parameters."
            ),
            Self::RecursionLimitExceeded { limit } => {
                write!(f, "maximum recursion depth exceeded (limit: {limit})")
            }
            Self::InvalidBuiltinArgument { builtin, reason } => write!(f, "{builtin}: {reason}"),

            // Control flow
            // `return` shares the loop wording.
            Self::ControlFlowOutsideContext { statement } => write!(
                f,
                "{} statements not allowed outside loops",
                statement.keyword()
            ),
            Self::InvalidConditionType { got } => {
                write!(f, "while loop condition must be a Boolean, got {got}")
            }
            Self::InvalidIterable { got } => write!(f, "for loop expects a List, got {got}"),
        }
    }
}

/// One call in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Rendered callee: `func(a, b)` or `builtin print`.
    pub name: String,
    /// Line of the call site.
    pub line: u32,
}

/// Snapshot of the call stack where an error left a call, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at line {}", frame.name, frame.line)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
    /// Source line of the node whose evaluation failed.
    pub line: Option<u32>,
    /// Calls active when the error was raised. Not part of `Display`.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            line: None,
            backtrace: None,
        }
    }

    /// Attach a backtrace unless one was captured closer to the failure.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace.get_or_insert(backtrace);
        self
    }

    /// Attach a source line, replacing any line already present.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach `line` unless a more precise line is already recorded.
    #[must_use]
    pub fn located(mut self, line: u32) -> Self {
        self.line.get_or_insert(line);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "error at line {line}: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Binding errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Assignment target is neither an identifier nor a list of identifiers.
#[cold]
pub fn invalid_assignment_target(target: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget {
        target: target.describe(),
    })
}

#[cold]
pub fn builtin_shadowing(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BuiltinShadowing {
        name: name.to_string(),
    })
}

// Arithmetic errors

#[cold]
pub fn cannot_convert_to_number(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotConvertToNumber {
        text: text.to_string(),
    })
}

/// Non-numeric operands for an arithmetic operator.
///
/// `op` must be one of `+ - * / %`.
#[cold]
pub fn arithmetic_type_mismatch(op: Operator, left: &Node, right: &Node) -> EvalError {
    let left = left.describe();
    let right = right.describe();
    let kind = match op {
        Operator::Plus => EvalErrorKind::CannotAddTypes { left, right },
        Operator::Minus => EvalErrorKind::CannotSubtractTypes { left, right },
        Operator::Asterisk => EvalErrorKind::CannotMultiplyTypes { left, right },
        Operator::ForwardSlash => EvalErrorKind::CannotDivideTypes { left, right },
        _ => EvalErrorKind::CannotModuloTypes { left, right },
    };
    EvalError::from_kind(kind)
}

#[cold]
pub fn divide_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivideByZero)
}

#[cold]
pub fn numeric_overflow(op: Operator) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NumericOverflow { op })
}

// Comparison, logic and collection errors

#[cold]
pub fn invalid_type_for_ordering(left: &Node, right: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidTypeForOrdering {
        left: left.describe(),
        right: right.describe(),
    })
}

#[cold]
pub fn invalid_logical_operands(op: Operator, left: &Node, right: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLogicalOperands {
        op,
        left: left.describe(),
        right: right.describe(),
    })
}

#[cold]
pub fn invalid_membership_operands(left: &Node, right: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidMembershipOperands {
        left: left.describe(),
        right: right.describe(),
    })
}

#[cold]
pub fn invalid_send_operands(left: &Node, right: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSendOperands {
        left: left.describe(),
        right: right.describe(),
    })
}

#[cold]
pub fn non_integer_index() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonIntegerIndex)
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn invalid_index_operands(left: &Node, right: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndexOperands {
        left: left.describe(),
        right: right.describe(),
    })
}

// Operator errors

/// `operator` is the operator's spoken name (`minus`, `bang`).
#[cold]
pub fn invalid_unary_operand(operator: &'static str, operand: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOperand {
        operator,
        operand: operand.describe(),
    })
}

#[cold]
pub fn invalid_unary_operator(op: Operator) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperator {
        position: OperatorPosition::Unary,
        op,
    })
}

#[cold]
pub fn invalid_binary_operator(op: Operator) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperator {
        position: OperatorPosition::Binary,
        op,
    })
}

// Call errors

#[cold]
pub fn not_callable(callee: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        callee: callee.describe(),
    })
}

/// Too many arguments for a user function.
#[cold]
pub fn wrong_function_args(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: String::new(),
        expected,
        got,
    })
}

/// Wrong argument count for a builtin.
#[cold]
pub fn wrong_builtin_args(builtin: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: builtin.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn missing_parameter_value(name: &str, needed: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingParameterValue {
        name: name.to_string(),
        needed,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { limit })
}

#[cold]
pub fn invalid_builtin_argument(builtin: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBuiltinArgument {
        builtin: builtin.to_string(),
        reason: reason.into(),
    })
}

// Control flow errors

#[cold]
pub fn control_flow_outside_context(statement: ControlStatement) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ControlFlowOutsideContext { statement })
}

#[cold]
pub fn invalid_condition_type(got: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConditionType {
        got: got.describe(),
    })
}

#[cold]
pub fn invalid_iterable(got: &Node) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIterable {
        got: got.describe(),
    })
}
