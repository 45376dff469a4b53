//! Operator tokens.
//!
//! Unary and binary expressions carry the operator *token* the parser saw,
//! not a pre-classified operation. Whether a token is meaningful in unary or
//! binary position is decided by the evaluator, which reports the token's
//! name and symbol when it is not.

use std::fmt;

/// An operator token as it appears in a unary or binary expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Arithmetic
    Plus,
    Minus,
    Asterisk,
    ForwardSlash,
    Modulo,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
    Not,

    // Collections and calls
    In,
    Send,
    At,
}

impl Operator {
    /// Token name, as used in diagnostics (`PLUS`, `NOT`, ...).
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Asterisk => "ASTERISK",
            Self::ForwardSlash => "FORWARD_SLASH",
            Self::Modulo => "MODULO",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Send => "SEND",
            Self::At => "AT",
        }
    }

    /// Source-level spelling of the token.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::ForwardSlash => "/",
            Self::Modulo => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::In => "in",
            Self::Send => "->",
            Self::At => "@",
        }
    }
}

/// Renders as `NAME ("symbol")`, the form diagnostics use.
impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (\"{}\")", self.token_name(), self.as_symbol())
    }
}
