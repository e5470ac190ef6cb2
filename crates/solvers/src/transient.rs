//! Time-marching integrators for ODE systems supplied by a
//! [`DerivativeProvider`](stride_core::DerivativeProvider).

pub mod abm;
pub mod rkf78;
