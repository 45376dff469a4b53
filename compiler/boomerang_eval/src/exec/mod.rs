//! Evaluation helpers the `Interpreter` delegates to.
//!
//! - `control`: control signals, evaluation context, destructuring
//! - `call`: argument checks and parameter binding

pub mod call;
pub mod control;
