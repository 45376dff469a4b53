//! Binary operator implementations.
//!
//! Operands arrive fully evaluated. Everything here is a pure function of the
//! two values except sending to a callable, which the interpreter handles
//! before delegating (see `Interpreter::eval_binary`).

use std::cmp::Ordering;

use boomerang_ir::number::{as_integer, format_number, parse_number};
use boomerang_ir::{Node, NodeKind, Operator};

use crate::errors::{
    arithmetic_type_mismatch, cannot_convert_to_number, divide_by_zero, index_out_of_range,
    invalid_binary_operator, invalid_index_operands, invalid_logical_operands,
    invalid_membership_operands, invalid_send_operands, invalid_type_for_ordering,
    non_integer_index, numeric_overflow, EvalError, EvalResult,
};

/// Evaluate `left op right`.
pub fn evaluate_binary(left: Node, op: Operator, right: Node) -> EvalResult {
    let line = left.line;
    let result = match op {
        Operator::Plus
        | Operator::Minus
        | Operator::Asterisk
        | Operator::ForwardSlash
        | Operator::Modulo => eval_arithmetic(op, &left, &right),
        Operator::Eq => Ok(Node::boolean(values_equal(&left, &right))),
        Operator::Ne => Ok(Node::boolean(!values_equal(&left, &right))),
        Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
            eval_ordering(op, &left, &right)
        }
        Operator::And | Operator::Or => eval_logical(op, &left, &right),
        Operator::In => eval_membership(&left, &right),
        Operator::Send => eval_send_to_list(left, right),
        Operator::At => eval_index(&left, &right),
        Operator::Not => Err(invalid_binary_operator(op)),
    }?;
    Ok(result.with_line(line))
}

/// Structural equality.
///
/// Kinds must match. Numbers compare by value when both parse, lists element
/// by element and monads by content. Never fails.
pub fn values_equal(left: &Node, right: &Node) -> bool {
    match (&left.kind, &right.kind) {
        (NodeKind::Number(a), NodeKind::Number(b)) => match (parse_number(a), parse_number(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (NodeKind::List(a), NodeKind::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (NodeKind::Monad(a), NodeKind::Monad(b)) => match (a, b) {
            (Some(a), Some(b)) => values_equal(a, b),
            (None, None) => true,
            _ => false,
        },
        _ => left == right,
    }
}

/// Parse the text of a `Number` node.
fn number_value(text: &str) -> Result<f64, EvalError> {
    parse_number(text).ok_or_else(|| cannot_convert_to_number(text))
}

/// Both operands as numbers, or `None` if either is not a `Number` node.
fn numeric_operands(left: &Node, right: &Node) -> Option<Result<(f64, f64), EvalError>> {
    match (&left.kind, &right.kind) {
        (NodeKind::Number(a), NodeKind::Number(b)) => {
            Some(number_value(a).and_then(|a| Ok((a, number_value(b)?))))
        }
        _ => None,
    }
}

fn eval_arithmetic(op: Operator, left: &Node, right: &Node) -> EvalResult {
    let Some(operands) = numeric_operands(left, right) else {
        return Err(arithmetic_type_mismatch(op, left, right));
    };
    let (a, b) = operands?;
    let value = match op {
        Operator::Plus => a + b,
        Operator::Minus => a - b,
        Operator::Asterisk => a * b,
        Operator::ForwardSlash | Operator::Modulo if b == 0.0 => return Err(divide_by_zero()),
        Operator::ForwardSlash => a / b,
        _ => a % b,
    };
    if !value.is_finite() {
        return Err(numeric_overflow(op));
    }
    Ok(Node::number(format_number(value)))
}

fn eval_ordering(op: Operator, left: &Node, right: &Node) -> EvalResult {
    let Some(operands) = numeric_operands(left, right) else {
        return Err(invalid_type_for_ordering(left, right));
    };
    let (a, b) = operands?;
    let Some(ordering) = a.partial_cmp(&b) else {
        return Err(invalid_type_for_ordering(left, right));
    };
    let result = match op {
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Node::boolean(result))
}

fn eval_logical(op: Operator, left: &Node, right: &Node) -> EvalResult {
    match (left.as_boolean(), right.as_boolean()) {
        (Some(a), Some(b)) => Ok(Node::boolean(if op == Operator::And {
            a && b
        } else {
            a || b
        })),
        _ => Err(invalid_logical_operands(op, left, right)),
    }
}

fn eval_membership(left: &Node, right: &Node) -> EvalResult {
    match right.as_list() {
        Some(items) => Ok(Node::boolean(
            items.iter().any(|item| values_equal(left, item)),
        )),
        None => Err(invalid_membership_operands(left, right)),
    }
}

/// `list -> value` appends; `list -> list` concatenates. Always a new list.
fn eval_send_to_list(left: Node, right: Node) -> EvalResult {
    let NodeKind::List(mut items) = left.kind else {
        return Err(invalid_send_operands(&left, &right));
    };
    match right.kind {
        NodeKind::List(more) => items.extend(more),
        _ => items.push(right),
    }
    Ok(Node::list(items))
}

fn eval_index(left: &Node, right: &Node) -> EvalResult {
    let NodeKind::Number(text) = &right.kind else {
        return Err(invalid_index_operands(left, right));
    };
    match &left.kind {
        NodeKind::List(items) => {
            let index = checked_index(text, items.len())?;
            Ok(items[index].clone())
        }
        NodeKind::RawString(value) => {
            let len = value.chars().count();
            let index = checked_index(text, len)?;
            let ch = value.chars().nth(index).map(String::from).unwrap_or_default();
            Ok(Node::string(ch))
        }
        _ => Err(invalid_index_operands(left, right)),
    }
}

/// Validate index text against a sequence of `len` elements.
fn checked_index(text: &str, len: usize) -> Result<usize, EvalError> {
    let value = number_value(text)?;
    let index = as_integer(value).ok_or_else(non_integer_index)?;
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_range(index, len))
}
