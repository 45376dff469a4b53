//! Calling user functions and builtins.

use boomerang_ir::{FunctionValue, Node, NodeKind, ScopeId};

use super::Interpreter;
use crate::builtins::BuiltinContext;
use crate::diagnostics::CallFrame;
use crate::environment::ScopeKind;
use crate::errors::{
    control_flow_outside_context, not_callable, undefined_variable, ControlStatement, EvalResult,
};
use crate::exec::call::{bind_parameters, check_arg_count};
use crate::exec::control::{ControlFlow, EvalContext};

impl Interpreter {
    /// Call `callee` with already evaluated arguments.
    ///
    /// A user function's result is wrapped in a Monad: `Monad{v}` for
    /// `return v`, `Monad{}` when the body ends without returning. Builtin
    /// results come back as they are.
    pub fn call(&mut self, callee: &Node, args: Vec<Node>, line: u32) -> EvalResult {
        match &callee.kind {
            NodeKind::Function(function) => self.call_function(function, args, line),
            NodeKind::BuiltinFunction(name) => self.call_builtin(name, args, line),
            _ => Err(not_callable(callee).with_line(line)),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(line = line, args = args.len()))]
    fn call_function(&mut self, function: &FunctionValue, args: Vec<Node>, line: u32) -> EvalResult {
        check_arg_count(function, &args)?;
        self.call_stack.push(CallFrame {
            name: function.to_string(),
            line,
        })?;

        // The activation's parent is the defining scope, not the caller's.
        let parent = function.scope().unwrap_or(ScopeId::GLOBAL);
        let result = self.with_env_scope(parent, ScopeKind::Activation, |scoped| {
            bind_parameters(scoped, function, args)?;
            scoped.eval_function_body(function.body())
        })
        .map_err(|err| self.call_stack.attach_backtrace(err));

        self.call_stack.pop();
        result
    }

    fn eval_function_body(&mut self, body: &[Node]) -> EvalResult {
        for statement in body {
            let stray = match self.eval(statement, EvalContext::FUNCTION_BODY)? {
                ControlFlow::Value(_) => continue,
                ControlFlow::Return(value) => return Ok(value.into_monad()),
                ControlFlow::Break => ControlStatement::Break,
                ControlFlow::Continue => ControlStatement::Continue,
            };
            return Err(control_flow_outside_context(stray).with_line(statement.line));
        }
        Ok(Node::empty_monad())
    }

    fn call_builtin(&mut self, name: &str, args: Vec<Node>, line: u32) -> EvalResult {
        let Some(builtin) = self.builtins.get(name) else {
            return Err(undefined_variable(name).with_line(line));
        };
        tracing::trace!(builtin = name, args = args.len(), "calling builtin");
        self.call_stack.push(CallFrame {
            name: format!("builtin {name}"),
            line,
        })?;
        let ctx = BuiltinContext {
            print_handler: &self.print_handler,
        };
        let result = builtin(&ctx, args).map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result
    }
}
