//! Function call helpers: argument count checks and parameter binding.

use boomerang_ir::{FunctionValue, Node};

use crate::errors::{missing_parameter_value, wrong_function_args, EvalError};
use crate::exec::control::{ControlFlow, EvalContext};
use crate::Interpreter;

/// Reject surplus positional arguments.
///
/// Missing arguments are not an arity error: they fall back to defaults in
/// [`bind_parameters`], which reports the first parameter left without one.
pub fn check_arg_count(func: &FunctionValue, args: &[Node]) -> Result<(), EvalError> {
    let total = func.params().len();
    if args.len() > total {
        return Err(wrong_function_args(total, args.len()));
    }
    Ok(())
}

/// Bind `args` to the parameters of `func` in the interpreter's current scope.
///
/// Parameters past the supplied arguments take their default, evaluated in
/// the call scope so it can refer to earlier parameters.
pub fn bind_parameters(
    interpreter: &mut Interpreter,
    func: &FunctionValue,
    args: Vec<Node>,
) -> Result<(), EvalError> {
    let provided = args.len();
    let total = func.params().len();
    let mut args = args.into_iter();
    for param in func.params() {
        let value = match (args.next(), &param.default) {
            (Some(arg), _) => arg,
            (None, Some(default)) => {
                match interpreter.eval(default, EvalContext::FUNCTION_BODY)? {
                    ControlFlow::Value(value) => value,
                    // A default is an expression; it has nothing to break out of.
                    _ => Node::empty_monad().with_line(default.line),
                }
            }
            (None, None) => {
                return Err(missing_parameter_value(&param.name, total - provided));
            }
        };
        interpreter.env.define(&param.name, value);
    }
    Ok(())
}
