//! Solvers for equation problems: finding roots of scalar equations.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to model inputs,
//! calls the model, and computes residuals. Solvers in this module drive those
//! residuals toward zero.
//!
//! # Solvers
//!
//! - [`brent`]: superlinear convergence on a bracketed interval
//!   with a bisection fallback
//!
//! [`EquationProblem`]: stride_core::EquationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod brent;
