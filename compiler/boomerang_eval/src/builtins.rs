//! Builtin functions.
//!
//! Builtins are looked up by name when an identifier has no binding, and
//! their names are reserved: assigning to one is an error. They receive
//! evaluated arguments and return their result directly, without the Monad
//! wrapping user function calls get.

use rustc_hash::FxHashMap;

use boomerang_ir::number::{as_integer, format_number, parse_number};
use boomerang_ir::{Node, NodeKind};

use crate::errors::{
    cannot_convert_to_number, invalid_builtin_argument, wrong_builtin_args, EvalError, EvalResult,
};
use crate::print_handler::PrintHandlerImpl;

/// What a builtin may touch besides its arguments.
pub struct BuiltinContext<'a> {
    pub print_handler: &'a PrintHandlerImpl,
}

pub type BuiltinFn = fn(&BuiltinContext<'_>, Vec<Node>) -> EvalResult;

/// Every builtin, in registration order.
const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("print", builtin_print),
    ("unwrap", builtin_unwrap),
    ("len", builtin_len),
    ("range", builtin_range),
];

/// Names reserved for builtins.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Name to implementation map.
#[derive(Clone)]
pub struct BuiltinRegistry {
    functions: FxHashMap<&'static str, BuiltinFn>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        BuiltinRegistry {
            functions: BUILTINS.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.functions.get(name).copied()
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_args(name: &str, args: &[Node], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_builtin_args(name, expected, args.len()))
    }
}

/// Write the arguments separated by spaces. Returns them as a list.
fn builtin_print(ctx: &BuiltinContext<'_>, args: Vec<Node>) -> EvalResult {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    ctx.print_handler.write_line(&line);
    Ok(Node::list(args))
}

/// `unwrap(monad, default)`: the Monad's value or `default`.
fn builtin_unwrap(_: &BuiltinContext<'_>, args: Vec<Node>) -> EvalResult {
    expect_args("unwrap", &args, 2)?;
    let mut args = args.into_iter();
    let (Some(value), Some(default)) = (args.next(), args.next()) else {
        return Err(wrong_builtin_args("unwrap", 2, 0));
    };
    Ok(match value.kind {
        NodeKind::Monad(Some(inner)) => *inner,
        NodeKind::Monad(None) => default,
        _ => value,
    })
}

/// Element count of a list, or character count of a string.
fn builtin_len(_: &BuiltinContext<'_>, args: Vec<Node>) -> EvalResult {
    expect_args("len", &args, 1)?;
    let count = match args.first().map(|arg| &arg.kind) {
        Some(NodeKind::List(items)) => items.len(),
        Some(NodeKind::RawString(value)) => value.chars().count(),
        _ => {
            let got = args.first().map(Node::describe).unwrap_or_default();
            return Err(invalid_builtin_argument(
                "len",
                format!("expected a List or String, got {got}"),
            ));
        }
    };
    Ok(Node::number(count.to_string()))
}

/// `range(end)`, `range(start, end)` or `range(start, end, step)`.
///
/// Integers from `start` (inclusive) to `end` (exclusive).
fn builtin_range(_: &BuiltinContext<'_>, args: Vec<Node>) -> EvalResult {
    let bounds = args
        .iter()
        .map(range_bound)
        .collect::<Result<Vec<i64>, EvalError>>()?;
    let (start, end, step) = match bounds[..] {
        [end] => (0, end, 1),
        [start, end] => (start, end, 1),
        [start, end, step] => (start, end, step),
        _ => {
            return Err(invalid_builtin_argument(
                "range",
                format!("expected 1 to 3 arguments, got {}", args.len()),
            ))
        }
    };
    if step == 0 {
        return Err(invalid_builtin_argument("range", "step must not be zero"));
    }
    let mut items = Vec::new();
    let mut current = start;
    while (step > 0 && current < end) || (step < 0 && current > end) {
        items.push(Node::number(current.to_string()));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Node::list(items))
}

fn range_bound(arg: &Node) -> Result<i64, EvalError> {
    let NodeKind::Number(text) = &arg.kind else {
        return Err(invalid_builtin_argument(
            "range",
            format!("expected a Number, got {}", arg.describe()),
        ));
    };
    let value = parse_number(text).ok_or_else(|| cannot_convert_to_number(text))?;
    as_integer(value).ok_or_else(|| {
        invalid_builtin_argument(
            "range",
            format!("expected an integer, got {}", format_number(value)),
        )
    })
}
