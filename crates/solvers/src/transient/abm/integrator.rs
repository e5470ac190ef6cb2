use stride_core::DerivativeProvider;

use crate::transient::rkf78::Rkf78;

use super::{Error, History, Order, Weights};

/// Progress through the current multistep step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Predicted,
    Corrected,
}

/// Adams-Bashforth-Moulton predictor-corrector.
///
/// The integrator owns the accepted state and a history of `step_count`
/// derivatives taken at equally spaced past states. Until that history is
/// full it advances with fixed [`Rkf78`] starter steps; afterwards each step
/// is [`predict`], [`correct`], [`estimate_error`], and then either
/// [`accept`] or a [`reset`] by the caller.
///
/// Changing the step size, replacing the state, or reversing direction
/// invalidates the history, so each of those resets the integrator and the
/// next steps are starter steps again.
///
/// [`predict`]: AdamsBashforthMoulton::predict
/// [`correct`]: AdamsBashforthMoulton::correct
/// [`estimate_error`]: AdamsBashforthMoulton::estimate_error
/// [`accept`]: AdamsBashforthMoulton::accept
/// [`reset`]: AdamsBashforthMoulton::reset
#[derive(Debug, Clone)]
pub struct AdamsBashforthMoulton {
    order: Order,
    weights: &'static Weights,
    step_size: f64,
    history: History,
    state: Vec<f64>,
    predicted: Vec<f64>,
    corrected: Vec<f64>,
    errors: Vec<f64>,
    ddt: Vec<f64>,
    starter: Rkf78,
    startup_count: usize,
    stage: Stage,
}

impl AdamsBashforthMoulton {
    /// Creates an integrator at `state` taking steps of `step_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is empty or `step_size` is zero or not
    /// finite.
    pub fn new(order: Order, state: Vec<f64>, step_size: f64) -> Result<Self, Error> {
        if state.is_empty() {
            return Err(Error::EmptyState);
        }
        check_step_size(step_size)?;

        let dimension = state.len();
        Ok(Self {
            order,
            weights: order.weights(),
            step_size,
            history: History::new(order.step_count(), dimension),
            state,
            predicted: vec![0.0; dimension],
            corrected: vec![0.0; dimension],
            errors: vec![0.0; dimension],
            ddt: vec![0.0; dimension],
            starter: Rkf78::new(dimension),
            startup_count: 0,
            stage: Stage::Idle,
        })
    }

    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// The current accepted state.
    #[must_use]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    #[must_use]
    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    #[must_use]
    pub fn corrected(&self) -> &[f64] {
        &self.corrected
    }

    /// Per-component error estimates from the last [`estimate_error`](Self::estimate_error).
    #[must_use]
    pub fn error_estimates(&self) -> &[f64] {
        &self.errors
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Starter steps taken since the last reset.
    #[must_use]
    pub fn startup_count(&self) -> usize {
        self.startup_count
    }

    #[must_use]
    pub fn is_startup_complete(&self) -> bool {
        self.startup_count == self.step_count() - 1
    }

    /// Restarts the history fill. Calling it repeatedly has no further effect.
    pub fn reset(&mut self) {
        if self.startup_count != 0 || self.stage != Stage::Idle {
            log::debug!("abm: reset after {} starter steps", self.startup_count);
        }
        self.startup_count = 0;
        self.stage = Stage::Idle;
    }

    /// Replaces the accepted state and resets.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` does not match the integrator's dimension.
    pub fn reset_state(&mut self, state: &[f64]) -> Result<(), Error> {
        if state.len() != self.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                actual: state.len(),
            });
        }
        self.state.copy_from_slice(state);
        self.reset();
        Ok(())
    }

    /// Sets the step size and resets.
    ///
    /// # Errors
    ///
    /// Returns an error if `step_size` is zero or not finite; the integrator
    /// is left unchanged in that case.
    pub fn set_step_size(&mut self, step_size: f64) -> Result<(), Error> {
        check_step_size(step_size)?;
        self.step_size = step_size;
        self.reset();
        Ok(())
    }

    /// Advances the accepted state by one starter step.
    ///
    /// The derivative at the current state is stored in the history before
    /// the step is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails; the accepted state is left
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the startup phase is already complete.
    pub fn fire_startup_step<P: DerivativeProvider>(&mut self, provider: &P) -> Result<(), Error> {
        assert!(
            !self.is_startup_complete(),
            "starter step requested after startup completed"
        );

        provider
            .derivatives(&self.state, 0.0, &mut self.ddt)
            .map_err(Error::derivative)?;
        self.history
            .get_mut(self.startup_count + 1)
            .copy_from_slice(&self.ddt);

        self.starter
            .step_from_slope(
                provider,
                &self.state,
                &self.ddt,
                self.step_size,
                &mut self.corrected,
            )
            .map_err(Error::derivative)?;
        self.state.copy_from_slice(&self.corrected);
        self.stage = Stage::Idle;

        self.startup_count += 1;
        if self.is_startup_complete() {
            log::debug!(
                "abm: startup complete after {} steps of {}",
                self.startup_count,
                self.step_size
            );
        }
        Ok(())
    }

    /// Pushes the derivative at the accepted state into the history and
    /// extrapolates it with the Adams-Bashforth weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails; neither the state nor the
    /// history is changed.
    ///
    /// # Panics
    ///
    /// Panics if the startup phase is not complete.
    pub fn predict<P: DerivativeProvider>(&mut self, provider: &P) -> Result<(), Error> {
        assert!(
            self.is_startup_complete(),
            "predict called before startup completed"
        );

        provider
            .derivatives(&self.state, 0.0, &mut self.ddt)
            .map_err(Error::derivative)?;
        self.history.push(&self.ddt);

        let h = self.step_size;
        for (j, p) in self.predicted.iter_mut().enumerate() {
            let sum: f64 = self
                .weights
                .predictor
                .iter()
                .zip(self.history.iter())
                .map(|(w, d)| w * d[j])
                .sum();
            *p = self.state[j] + h * sum;
        }

        self.stage = Stage::Predicted;
        Ok(())
    }

    /// Refines the predicted state with the Adams-Moulton weights.
    ///
    /// The derivative at the predicted state comes from
    /// [`DerivativeProvider::derivatives_with_hint`] and is not stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails. The history has already been
    /// shifted by [`predict`](Self::predict) at that point, so the integrator
    /// resets itself.
    ///
    /// # Panics
    ///
    /// Panics unless [`predict`](Self::predict) succeeded since the last
    /// correction.
    pub fn correct<P: DerivativeProvider>(&mut self, provider: &P) -> Result<(), Error> {
        assert!(
            self.stage == Stage::Predicted,
            "correct called without a preceding predict"
        );

        let h = self.step_size;
        if let Err(err) = provider.derivatives_with_hint(&self.predicted, h, &mut self.ddt) {
            log::warn!("abm: corrector derivative failed, restarting: {err}");
            self.reset();
            return Err(Error::derivative(err));
        }

        // The oldest derivative drops out; the predicted-state derivative
        // takes the last weight.
        let n = self.step_count();
        let last = self.weights.corrector[n - 1];
        let rest = &self.weights.corrector[..n - 1];
        for (j, c) in self.corrected.iter_mut().enumerate() {
            let sum: f64 = rest
                .iter()
                .zip(self.history.iter().skip(1))
                .map(|(w, d)| w * d[j])
                .sum();
            *c = self.state[j] + h * last * self.ddt[j] + h * sum;
        }

        self.stage = Stage::Corrected;
        Ok(())
    }

    /// Estimates the local error of the corrected state.
    ///
    /// Component errors are `|error_factor * (corrected - predicted)|`; the
    /// provider reduces them to the returned scalar.
    ///
    /// # Panics
    ///
    /// Panics unless [`correct`](Self::correct) succeeded for this step.
    pub fn estimate_error<P: DerivativeProvider>(&mut self, provider: &P) -> f64 {
        assert!(
            self.stage == Stage::Corrected,
            "estimate_error called without a corrected state"
        );

        let factor = self.weights.error_factor;
        for ((e, c), p) in self.errors.iter_mut().zip(&self.corrected).zip(&self.predicted) {
            *e = (factor * (c - p)).abs();
        }
        provider.estimate_error(&self.errors, &self.corrected)
    }

    /// Makes the corrected state the accepted state.
    ///
    /// # Panics
    ///
    /// Panics unless [`correct`](Self::correct) succeeded for this step.
    pub fn accept(&mut self) {
        assert!(
            self.stage == Stage::Corrected,
            "accept called without a corrected state"
        );
        self.state.copy_from_slice(&self.corrected);
        self.stage = Stage::Idle;
    }
}

fn check_step_size(step_size: f64) -> Result<(), Error> {
    if step_size.is_finite() && step_size != 0.0 {
        Ok(())
    } else {
        Err(Error::NonFiniteStepSize(step_size))
    }
}
