use crate::error_norm;

/// Supplies the right-hand side of an ODE system to a stepping integrator.
///
/// A provider owns the physics (gravity, drag, and so on) and the epoch of the
/// current accepted state. Integrators ask it for derivatives at trial states
/// expressed as an epoch offset `dt` from that accepted state, and tell it
/// when a step has been accepted via [`advance_epoch`].
///
/// Derivative calls take `&self`. Providers that cache force-model data
/// between calls should use interior mutability.
///
/// [`advance_epoch`]: DerivativeProvider::advance_epoch
pub trait DerivativeProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the time derivative of `state` at epoch offset `dt`.
    ///
    /// `out` has the same length as `state`. An implementation must not
    /// assume `out` holds anything meaningful on entry.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated, for
    /// example when a force model is singular at `state`.
    fn derivatives(&self, state: &[f64], dt: f64, out: &mut [f64]) -> Result<(), Self::Error>;

    /// Evaluates the derivative at a corrector trial state.
    ///
    /// The predictor-corrector integrators call this instead of
    /// [`derivatives`](DerivativeProvider::derivatives) when evaluating the
    /// predicted state, passing the step size as `step_hint`. Providers that
    /// evaluate light-time or event functions at the provisional epoch can
    /// override it; the default forwards to `derivatives` with the hint as the
    /// epoch offset.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated.
    fn derivatives_with_hint(
        &self,
        state: &[f64],
        step_hint: f64,
        out: &mut [f64],
    ) -> Result<(), Self::Error> {
        self.derivatives(state, step_hint, out)
    }

    /// Reduces per-component error estimates to a single scalar.
    ///
    /// `errors` holds non-negative local error estimates and `reference` the
    /// state they refer to. The default returns the largest component; see
    /// [`error_norm`] for relative reductions.
    fn estimate_error(&self, errors: &[f64], _reference: &[f64]) -> f64 {
        error_norm::max_absolute(errors)
    }

    /// Moves the provider's epoch forward by an accepted step of `dt`.
    ///
    /// The default does nothing, which suits autonomous systems.
    fn advance_epoch(&mut self, _dt: f64) {}

    /// Reports whether the state was changed outside the integrator.
    ///
    /// Step managers poll this before each step and restart the multistep
    /// history when it returns `true`.
    fn state_changed(&self) -> bool {
        false
    }
}
