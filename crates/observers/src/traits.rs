//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasResidual`]: events that carry a residual value
//! - [`HasError`]: events that carry a local error estimate
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use stride_core::Observer;
//! use stride_observers::traits::{CanStopEarly, HasError};
//!
//! /// Stops once the local error has stayed below a bound for a while.
//! struct Settled {
//!     bound: f64,
//!     needed: usize,
//!     run: usize,
//! }
//!
//! impl<E: HasError, A: CanStopEarly> Observer<E, A> for Settled {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if event.error() < self.bound {
//!             self.run += 1;
//!         } else {
//!             self.run = 0;
//!         }
//!         (self.run >= self.needed).then(A::stop_early)
//!     }
//! }
//! ```

use stride_solvers::{equation::brent, transient::abm};

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    fn residual(&self) -> f64;
}

/// An event that carries a local error estimate.
pub trait HasError {
    /// Returns the error estimate of the step behind this event.
    fn error(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<I, O> HasResidual for brent::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        self.eval.residuals[0]
    }
}

impl HasError for abm::Event<'_> {
    fn error(&self) -> f64 {
        self.error
    }
}

impl CanStopEarly for brent::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for abm::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use stride_core::{DerivativeProvider, EquationProblem, Model, Observer};

    /// Stops as soon as the residual is within a tolerance.
    struct CloseEnough(f64);

    impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for CloseEnough {
        fn observe(&mut self, event: &E) -> Option<A> {
            (event.residual().abs() < self.0).then(A::stop_early)
        }
    }

    /// Stops after a number of steps whose error exceeds zero.
    struct MultistepBudget(usize);

    impl<E: HasError, A: CanStopEarly> Observer<E, A> for MultistepBudget {
        fn observe(&mut self, event: &E) -> Option<A> {
            if event.error() > 0.0 {
                self.0 = self.0.saturating_sub(1);
            }
            (self.0 == 0).then(A::stop_early)
        }
    }

    struct Square;

    impl Model for Square {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Infallible> {
            Ok(x * x)
        }
    }

    struct Two;

    impl EquationProblem<1> for Two {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
            Ok([output - 2.0])
        }
    }

    struct Decay;

    impl DerivativeProvider for Decay {
        type Error = Infallible;

        fn derivatives(&self, state: &[f64], _dt: f64, out: &mut [f64]) -> Result<(), Infallible> {
            out[0] = -state[0];
            Ok(())
        }
    }

    #[test]
    fn residual_observer_stops_brent() {
        let config = brent::Config::new(100, 0.0).expect("valid config");
        let solution = brent::solve(&Square, &Two, [1.0, 2.0], &config, CloseEnough(1e-3))
            .expect("should solve");

        assert_eq!(solution.status, brent::Status::StoppedByObserver);
        assert_relative_eq!(solution.x, 2.0_f64.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn error_observer_stops_abm() {
        let solution = abm::propagate(
            &mut Decay,
            vec![1.0],
            1.0,
            &abm::Config::fixed(0.1, 1e-6),
            MultistepBudget(2),
        )
        .expect("should propagate");

        // Three starter steps, then two multistep steps.
        assert_eq!(solution.status, abm::Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
    }
}
