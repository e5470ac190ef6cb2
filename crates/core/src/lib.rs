//! Core traits and types for the Stride propagation framework.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts root-finding variables to model inputs and
//!   extracts residuals from outputs
//! - [`DerivativeProvider`]: supplies the right-hand side of an ODE system to
//!   the multistep integrators
//! - [`error_norm`]: reductions from per-component error estimates to a scalar

pub mod error_norm;

mod model;
mod observer;
mod problems;

pub use observer::Observer;
pub use problems::{DerivativeProvider, EquationProblem};
pub use {model::Model, model::Snapshot};
