//! Tree-walking interpreter for Boomerang.
//!
//! Every node evaluates to a [`ControlFlow`]. Expressions produce
//! `ControlFlow::Value`; `break`, `continue` and `return` produce signals that
//! travel up through blocks until a loop or a call consumes them. The
//! [`EvalContext`] passed alongside says which signals are legal where the
//! node sits.
//!
//! Helper modules in `crate::exec` hold the pieces that do not need the
//! whole interpreter:
//!
//! - `exec::control` - signals, loop actions, destructuring
//! - `exec::call` - argument checks, parameter binding

mod builder;
mod format;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use boomerang_ir::number::normalize;
use boomerang_ir::{FunctionValue, Node, NodeKind, Operator, WhenCase};
use boomerang_stack::ensure_sufficient_stack;

use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{
    control_flow_outside_context, invalid_condition_type, invalid_iterable, not_callable,
    undefined_variable, ControlStatement, EvalError, EvalResult,
};
use crate::exec::control::{
    binding_names, destructure, to_loop_action, value, ControlFlow, EvalContext, LoopAction,
};
use crate::operators::{evaluate_binary, values_equal};
use crate::print_handler::SharedPrintHandler;
use crate::unary_operators::evaluate_unary;
use format::fill_template;

/// Evaluation state: scopes, builtins, output and the call stack.
///
/// The global scope persists across [`Interpreter::evaluate`] calls, so one
/// interpreter can run a program in pieces the way a REPL does.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) builtins: BuiltinRegistry,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// An interpreter printing to stdout with the default call depth.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Text captured by a buffer print handler; empty for other handlers.
    pub fn get_print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Value `name` resolves to from the current scope.
    pub fn lookup(&self, name: &str) -> Option<Node> {
        match self.env.lookup(name) {
            Some(value) => Some(value.clone()),
            None if self.builtins.contains(name) => Some(Node::builtin(name)),
            None => None,
        }
    }

    /// Evaluate top-level nodes in order, one result per node.
    ///
    /// Stops at the first error.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
    pub fn evaluate(&mut self, nodes: &[Node]) -> Result<Vec<Node>, EvalError> {
        nodes
            .iter()
            .map(|node| {
                let flow = self.eval(node, EvalContext::TOP_LEVEL)?;
                settle(flow, node.line)
            })
            .collect()
    }

    /// Evaluate a single node.
    pub fn eval(&mut self, node: &Node, ctx: EvalContext) -> Result<ControlFlow, EvalError> {
        ensure_sufficient_stack(|| self.eval_node(node, ctx)).map_err(|err| err.located(node.line))
    }

    fn eval_node(&mut self, node: &Node, ctx: EvalContext) -> Result<ControlFlow, EvalError> {
        let line = node.line;
        match &node.kind {
            NodeKind::Number(text) => Ok(ControlFlow::Value(match normalize(text) {
                Some(canonical) => Node::number(canonical).with_line(line),
                // Unparseable text surfaces when arithmetic needs the value.
                None => node.clone(),
            })),
            NodeKind::Boolean(_)
            | NodeKind::RawString(_)
            | NodeKind::Monad(_)
            | NodeKind::BuiltinFunction(_) => Ok(ControlFlow::Value(node.clone())),
            NodeKind::Function(function) => {
                Ok(ControlFlow::Value(self.eval_function_literal(function, line)))
            }
            NodeKind::TemplatedString { format, params } => {
                let mut rendered = Vec::with_capacity(params.len());
                for param in params {
                    rendered.push(value!(self.eval(param, ctx)?).to_string());
                }
                let text = fill_template(format, &rendered);
                Ok(ControlFlow::Value(Node::string(text).with_line(line)))
            }
            NodeKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(value!(self.eval(item, ctx)?));
                }
                Ok(ControlFlow::Value(Node::list(values).with_line(line)))
            }
            NodeKind::Identifier(name) => self.eval_identifier(name, line).map(ControlFlow::Value),
            NodeKind::FunctionCall { callee, args } => self.eval_call_expr(callee, args, ctx, line),
            NodeKind::BinaryExpression { left, op, right } => {
                self.eval_binary(left, *op, right, ctx, line)
            }
            NodeKind::UnaryExpression { op, operand } => {
                let operand = value!(self.eval(operand, ctx)?);
                evaluate_unary(*op, operand).map(ControlFlow::Value)
            }
            NodeKind::AssignStatement { target, value } => {
                self.eval_assign(target, value, ctx, line)
            }
            NodeKind::ReturnStatement(value) => {
                if !ctx.in_function {
                    return Err(control_flow_outside_context(ControlStatement::Return));
                }
                let value = value!(self.eval(value, ctx)?);
                Ok(ControlFlow::Return(value))
            }
            NodeKind::BreakStatement => {
                if ctx.in_loop {
                    Ok(ControlFlow::Break)
                } else {
                    Err(control_flow_outside_context(ControlStatement::Break))
                }
            }
            NodeKind::ContinueStatement => {
                if ctx.in_loop {
                    Ok(ControlFlow::Continue)
                } else {
                    Err(control_flow_outside_context(ControlStatement::Continue))
                }
            }
            NodeKind::WhileLoop { condition, body } => self.eval_while(condition, body, ctx, line),
            NodeKind::ForLoop {
                target,
                iterable,
                body,
            } => self.eval_for(target, iterable, body, ctx, line),
            NodeKind::When {
                subject,
                cases,
                default,
            } => self.eval_when(subject, cases, default, ctx),
            NodeKind::BlockStatement(statements) => self.eval_block(statements, ctx),
        }
    }

    /// Evaluate statements in the current scope, stopping at the first signal.
    ///
    /// The value is the last statement's, or an empty Monad for no statements.
    pub(crate) fn eval_statements(
        &mut self,
        statements: &[Node],
        ctx: EvalContext,
    ) -> Result<ControlFlow, EvalError> {
        let mut last = None;
        for statement in statements {
            match self.eval(statement, ctx)? {
                ControlFlow::Value(value) => last = Some(value),
                signal => return Ok(signal),
            }
        }
        Ok(ControlFlow::Value(last.unwrap_or_else(Node::empty_monad)))
    }

    fn eval_block(&mut self, statements: &[Node], ctx: EvalContext) -> Result<ControlFlow, EvalError> {
        self.with_block_scope(|scoped| scoped.eval_statements(statements, ctx))
    }

    /// A function literal closes over the scope it is evaluated in.
    fn eval_function_literal(&mut self, function: &FunctionValue, line: u32) -> Node {
        let closed = match function.scope() {
            Some(_) => function.clone(),
            None => function.closed_over(self.env.capture()),
        };
        Node::new(NodeKind::Function(closed)).with_line(line)
    }

    fn eval_identifier(&self, name: &str, line: u32) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value.clone());
        }
        if self.builtins.contains(name) {
            return Ok(Node::builtin(name).with_line(line));
        }
        Err(undefined_variable(name))
    }

    fn eval_call_expr(
        &mut self,
        callee: &Node,
        args: &[Node],
        ctx: EvalContext,
        line: u32,
    ) -> Result<ControlFlow, EvalError> {
        let callee = value!(self.eval(callee, ctx)?);
        if !is_callable(&callee) {
            return Err(not_callable(&callee));
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(value!(self.eval(arg, ctx)?));
        }
        self.call(&callee, values, line).map(ControlFlow::Value)
    }

    fn eval_binary(
        &mut self,
        left: &Node,
        op: Operator,
        right: &Node,
        ctx: EvalContext,
        line: u32,
    ) -> Result<ControlFlow, EvalError> {
        let left = value!(self.eval(left, ctx)?);
        let right = value!(self.eval(right, ctx)?);
        if op == Operator::Send && is_callable(&left) {
            let args = match right.kind {
                NodeKind::List(items) => items,
                _ => vec![right],
            };
            return self.call(&left, args, line).map(ControlFlow::Value);
        }
        evaluate_binary(left, op, right).map(ControlFlow::Value)
    }

    /// `x = v` binds `v`; `(a, b) = v` destructures `v` and evaluates to the
    /// list of bound values.
    fn eval_assign(
        &mut self,
        target: &Node,
        value: &Node,
        ctx: EvalContext,
        line: u32,
    ) -> Result<ControlFlow, EvalError> {
        let builtins = &self.builtins;
        let names = binding_names(target, |name| builtins.contains(name))?;
        let value = value!(self.eval(value, ctx)?);

        if let NodeKind::Identifier(name) = &target.kind {
            self.env.assign(name, value.clone());
            return Ok(ControlFlow::Value(value));
        }
        let values = destructure(names.len(), value);
        for (name, value) in names.iter().zip(&values) {
            self.env.assign(name, value.clone());
        }
        Ok(ControlFlow::Value(Node::list(values).with_line(line)))
    }

    /// A `while` loop evaluates to an empty Monad.
    ///
    /// A top-level `while` still yields that Monad as its result, so
    /// `evaluate` returns exactly one value per node. Do not drop it from
    /// the results.
    #[tracing::instrument(level = "debug", skip_all, fields(line = line))]
    fn eval_while(
        &mut self,
        condition: &Node,
        body: &[Node],
        ctx: EvalContext,
        line: u32,
    ) -> Result<ControlFlow, EvalError> {
        let body_ctx = ctx.enter_loop();
        loop {
            let tested = value!(self.eval(condition, ctx)?);
            let Some(keep_going) = tested.as_boolean() else {
                return Err(invalid_condition_type(&tested));
            };
            if !keep_going {
                break;
            }
            let flow = self.with_block_scope(|scoped| scoped.eval_statements(body, body_ctx))?;
            match to_loop_action(flow) {
                LoopAction::Next(_) | LoopAction::Skip => {}
                LoopAction::Break => break,
                LoopAction::Exit(signal) => return Ok(signal),
            }
        }
        Ok(ControlFlow::Value(Node::empty_monad().with_line(line)))
    }

    /// A `for` loop evaluates to the list of its iterations' values, each
    /// wrapped in a Monad. Iterations ended by `continue` contribute nothing.
    #[tracing::instrument(level = "debug", skip_all, fields(line = line))]
    fn eval_for(
        &mut self,
        target: &Node,
        iterable: &Node,
        body: &[Node],
        ctx: EvalContext,
        line: u32,
    ) -> Result<ControlFlow, EvalError> {
        let builtins = &self.builtins;
        let names = binding_names(target, |name| builtins.contains(name))?;
        let single = matches!(target.kind, NodeKind::Identifier(_));

        let iterable = value!(self.eval(iterable, ctx)?);
        let items = match iterable.kind {
            NodeKind::List(items) => items,
            _ => return Err(invalid_iterable(&iterable)),
        };

        let body_ctx = ctx.enter_loop();
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let bindings: Vec<(&str, Node)> = if single {
                names.iter().copied().zip([item]).collect()
            } else {
                names
                    .iter()
                    .copied()
                    .zip(destructure(names.len(), item))
                    .collect()
            };
            let flow =
                self.with_bindings(bindings, |scoped| scoped.eval_statements(body, body_ctx))?;
            match to_loop_action(flow) {
                LoopAction::Next(value) => results.push(value.into_monad()),
                LoopAction::Skip => {}
                LoopAction::Break => break,
                LoopAction::Exit(signal) => return Ok(signal),
            }
        }
        Ok(ControlFlow::Value(Node::list(results).with_line(line)))
    }

    /// First case whose condition equals the subject wins; otherwise the
    /// default body runs. The chosen body's value is wrapped in a Monad.
    fn eval_when(
        &mut self,
        subject: &Node,
        cases: &[WhenCase],
        default: &[Node],
        ctx: EvalContext,
    ) -> Result<ControlFlow, EvalError> {
        let subject = value!(self.eval(subject, ctx)?);
        for case in cases {
            let condition = value!(self.eval(&case.condition, ctx)?);
            if values_equal(&condition, &subject) {
                return self.eval_when_body(&case.body, ctx);
            }
        }
        self.eval_when_body(default, ctx)
    }

    fn eval_when_body(&mut self, body: &[Node], ctx: EvalContext) -> Result<ControlFlow, EvalError> {
        Ok(match self.eval_block(body, ctx)? {
            ControlFlow::Value(value) => ControlFlow::Value(value.into_monad()),
            signal => signal,
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_callable(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Function(_) | NodeKind::BuiltinFunction(_)
    )
}

/// The value of a statement evaluated where no signal can be consumed.
fn settle(flow: ControlFlow, line: u32) -> EvalResult {
    let statement = match flow {
        ControlFlow::Value(value) => return Ok(value),
        ControlFlow::Break => ControlStatement::Break,
        ControlFlow::Continue => ControlStatement::Continue,
        ControlFlow::Return(_) => ControlStatement::Return,
    };
    Err(control_flow_outside_context(statement).with_line(line))
}
