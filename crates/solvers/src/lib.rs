//! Numerical solvers for the Stride propagation framework.
//!
//! - [`transient::abm`]: Adams-Bashforth-Moulton predictor-corrector
//!   integration with step-size control
//! - [`transient::rkf78`]: Fehlberg 7(8) single-step integrator, used to
//!   start the multistep methods
//! - [`equation::brent`]: Brent-Dekker bracketing root finder

pub mod equation;
pub mod transient;
