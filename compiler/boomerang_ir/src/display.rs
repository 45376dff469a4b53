//! Display rendering.
//!
//! The rendered form of a value is what `print` writes and what a templated
//! string substitutes. Syntax nodes render a compact source-like form so that
//! diagnostics naming them stay readable.

use std::fmt::{self, Write as _};

use crate::{FunctionValue, Node, NodeKind, Param, WhenCase};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Number(text) => f.write_str(text),
            NodeKind::Boolean(value) => write!(f, "{value}"),
            NodeKind::RawString(value) => f.write_str(value),
            NodeKind::TemplatedString { format, .. } => f.write_str(format),
            NodeKind::List(items) => {
                f.write_char('(')?;
                write_separated(f, items)?;
                f.write_char(')')
            }
            NodeKind::Identifier(name) => f.write_str(name),
            NodeKind::Function(function) => write!(f, "{function}"),
            NodeKind::FunctionCall { callee, args } => {
                write!(f, "{callee}(")?;
                write_separated(f, args)?;
                f.write_char(')')
            }
            NodeKind::BinaryExpression { left, op, right } => {
                write!(f, "{left} {} {right}", op.as_symbol())
            }
            NodeKind::UnaryExpression { op, operand } => {
                let symbol = op.as_symbol();
                if symbol.chars().all(char::is_alphabetic) {
                    write!(f, "{symbol} {operand}")
                } else {
                    write!(f, "{symbol}{operand}")
                }
            }
            NodeKind::AssignStatement { target, value } => write!(f, "{target} = {value}"),
            NodeKind::ReturnStatement(value) => write!(f, "return {value}"),
            NodeKind::BreakStatement => f.write_str("break"),
            NodeKind::ContinueStatement => f.write_str("continue"),
            NodeKind::WhileLoop { condition, body } => {
                write!(f, "while {condition} ")?;
                write_body(f, body)
            }
            NodeKind::ForLoop {
                target,
                iterable,
                body,
            } => {
                write!(f, "for {target} in {iterable} ")?;
                write_body(f, body)
            }
            NodeKind::When {
                subject,
                cases,
                default,
            } => write_when(f, subject, cases, default),
            NodeKind::BlockStatement(statements) => write_body(f, statements),
            NodeKind::Monad(None) => f.write_str("Monad{}"),
            NodeKind::Monad(Some(value)) => write!(f, "Monad{{{value}}}"),
            NodeKind::BuiltinFunction(name) => write!(f, "builtin {name}"),
        }
    }
}

/// Renders the signature: `func(a, b=1)`.
impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func(")?;
        for (i, param) in self.params().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_char(')')
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={default}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

fn write_body(f: &mut fmt::Formatter<'_>, statements: &[Node]) -> fmt::Result {
    if statements.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{statement}")?;
    }
    f.write_str(" }")
}

fn write_when(
    f: &mut fmt::Formatter<'_>,
    subject: &Node,
    cases: &[WhenCase],
    default: &[Node],
) -> fmt::Result {
    write!(f, "when {subject} {{")?;
    for case in cases {
        write!(f, " is {} ", case.condition)?;
        write_body(f, &case.body)?;
    }
    if !default.is_empty() {
        f.write_str(" else ")?;
        write_body(f, default)?;
    }
    f.write_str(" }")
}
