//! Unary operator implementations.

use boomerang_ir::number::{format_number, parse_number};
use boomerang_ir::{Node, NodeKind, Operator};

use crate::errors::{
    cannot_convert_to_number, invalid_unary_operand, invalid_unary_operator, EvalResult,
};

/// Evaluate `op operand`. Only `-` on numbers and `not` on booleans exist.
pub fn evaluate_unary(op: Operator, operand: Node) -> EvalResult {
    let line = operand.line;
    let result = match op {
        Operator::Minus => negate(&operand),
        Operator::Not => match operand.as_boolean() {
            Some(value) => Ok(Node::boolean(!value)),
            None => Err(invalid_unary_operand("bang", &operand)),
        },
        _ => Err(invalid_unary_operator(op)),
    }?;
    Ok(result.with_line(line))
}

fn negate(operand: &Node) -> EvalResult {
    let NodeKind::Number(text) = &operand.kind else {
        return Err(invalid_unary_operand("minus", operand));
    };
    let value = parse_number(text).ok_or_else(|| cannot_convert_to_number(text))?;
    Ok(Node::number(format_number(-value)))
}
