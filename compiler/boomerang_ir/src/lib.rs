//! Node model for the Boomerang language.
//!
//! Boomerang programs and the values they compute share one representation,
//! [`Node`]. This crate owns that representation together with the operator
//! tokens, the canonical number format and display rendering. Evaluation
//! lives in `boomerang_eval`.

mod display;
mod node;
pub mod number;
mod operator;

pub use node::{FunctionDef, FunctionValue, Node, NodeKind, Param, ScopeId, WhenCase};
pub use operator::Operator;
