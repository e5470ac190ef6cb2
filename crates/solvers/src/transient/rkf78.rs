//! Fixed-step Runge-Kutta-Fehlberg 7(8).
//!
//! Each call advances by exactly the requested step using the eighth-order
//! solution; the embedded error estimate is not computed.
//!
//! The multistep integrators use [`Rkf78::step_from_slope`] to fill their
//! derivative history, since they already hold the slope at the current
//! state. [`Rkf78::step`] is the standalone entry point for callers that just
//! want one accurate step, such as refining a state between output times:
//!
//! ```
//! use std::convert::Infallible;
//!
//! use stride_core::DerivativeProvider;
//! use stride_solvers::transient::rkf78::Rkf78;
//!
//! /// `y' = -y`
//! struct Decay;
//!
//! impl DerivativeProvider for Decay {
//!     type Error = Infallible;
//!
//!     fn derivatives(&self, state: &[f64], _dt: f64, out: &mut [f64]) -> Result<(), Infallible> {
//!         out[0] = -state[0];
//!         Ok(())
//!     }
//! }
//!
//! let mut rk = Rkf78::new(1);
//! let mut next = [0.0];
//! rk.step(&Decay, &[1.0], 0.1, &mut next).unwrap();
//!
//! assert!((next[0] - (-0.1_f64).exp()).abs() < 1e-12);
//! ```

mod tableau;

use stride_core::DerivativeProvider;

use tableau::{COUPLING, NODES, STAGES, WEIGHTS};

/// Stage storage for a single-step RKF78 integrator.
#[derive(Debug, Clone)]
pub struct Rkf78 {
    stages: Vec<Vec<f64>>,
    trial: Vec<f64>,
}

impl Rkf78 {
    /// Allocates stage storage for states of length `dimension`.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            stages: vec![vec![0.0; dimension]; STAGES],
            trial: vec![0.0; dimension],
        }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.trial.len()
    }

    /// Advances `state` by `h`, writing the result to `out`.
    ///
    /// `out` is only written once every stage has been evaluated, so a
    /// failing provider leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns the provider's error from the first stage that fails.
    pub fn step<P: DerivativeProvider>(
        &mut self,
        provider: &P,
        state: &[f64],
        h: f64,
        out: &mut [f64],
    ) -> Result<(), P::Error> {
        provider.derivatives(state, 0.0, &mut self.stages[0])?;
        self.advance(provider, state, h, out)
    }

    /// Like [`step`](Self::step), reusing an already evaluated `slope`
    /// at `state` as the first stage.
    ///
    /// # Errors
    ///
    /// Returns the provider's error from the first stage that fails.
    pub fn step_from_slope<P: DerivativeProvider>(
        &mut self,
        provider: &P,
        state: &[f64],
        slope: &[f64],
        h: f64,
        out: &mut [f64],
    ) -> Result<(), P::Error> {
        self.stages[0].copy_from_slice(slope);
        self.advance(provider, state, h, out)
    }

    fn advance<P: DerivativeProvider>(
        &mut self,
        provider: &P,
        state: &[f64],
        h: f64,
        out: &mut [f64],
    ) -> Result<(), P::Error> {
        debug_assert_eq!(state.len(), self.dimension());
        debug_assert_eq!(out.len(), self.dimension());

        for i in 1..STAGES {
            let (done, rest) = self.stages.split_at_mut(i);
            for (j, y) in self.trial.iter_mut().enumerate() {
                let increment: f64 = done.iter().zip(&COUPLING[i]).map(|(k, a)| a * k[j]).sum();
                *y = state[j] + h * increment;
            }
            provider.derivatives(&self.trial, NODES[i] * h, &mut rest[0])?;
        }

        for (j, y) in out.iter_mut().enumerate() {
            let increment: f64 = self.stages.iter().zip(WEIGHTS).map(|(k, b)| b * k[j]).sum();
            *y = state[j] + h * increment;
        }

        Ok(())
    }
}
