//! Reusable observers for the Stride framework.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in [`stride_solvers`].
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasError`], [`CanStopEarly`])
//! - [`LogObserver`]: writes solver events to the `log` facade
//!
//! [`Observer`]: stride_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasError`]: traits::HasError
//! [`CanStopEarly`]: traits::CanStopEarly

mod logging;
pub mod traits;

pub use logging::LogObserver;
