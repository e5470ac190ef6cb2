//! Adams-Bashforth-Moulton predictor-corrector propagation.
//!
//! # Algorithm
//!
//! An order-`k` integrator keeps the derivatives at the last `k` accepted
//! states. Each step extrapolates them with the Adams-Bashforth weights
//! (the predictor), evaluates the derivative at the predicted state, and
//! interpolates with the Adams-Moulton weights (the corrector). The
//! difference between the two, scaled by the Milne factor, estimates the
//! local error of the corrected state.
//!
//! The history is only valid for equally spaced steps along one trajectory.
//! Whenever the step size or the state changes from outside, the integrator
//! resets and refills it with `k - 1` fixed [`Rkf78`](super::rkf78::Rkf78)
//! starter steps.
//!
//! [`AdamsBashforthMoulton`] exposes the individual stages. [`propagate`]
//! wraps them in the accept/reject loop that controls the step size.
//!
//! # Observer Events
//!
//! [`propagate`] emits one [`Event`] for the initial state and one per
//! accepted step. Observers can return [`Action::StopEarly`] to finish, or
//! [`Action::ReplaceState`] to apply an impulsive change.

mod adapt;
mod config;
mod error;
mod event;
mod history;
mod integrator;
mod order;
mod solution;


pub use config::{Config, ConfigError, StepMode};
pub use error::Error;
pub use event::{Action, Event, StepKind};
pub use history::History;
pub use integrator::AdamsBashforthMoulton;
pub use order::{Order, Weights};
pub use solution::{Sample, Solution, Status};

use stride_core::{DerivativeProvider, Observer};

use adapt::{Adjustment, GRID_SLACK, adjust_step};

/// Propagates `initial` over `span` time units.
///
/// A negative `span` propagates backward. Times in the returned solution and
/// in events are elapsed times from the start, with the provider's epoch
/// advanced after every accepted step.
///
/// # Step control
///
/// A step is accepted when its error estimate is at most
/// `config.tolerance`. Rejected steps shrink and are retried. Accepted steps
/// with an error below `config.lower_error` let the next step grow. In
/// [`StepMode::Fixed`] the step only changes by powers of two and always
/// divides the span.
///
/// # Errors
///
/// Returns an error if the config or inputs are invalid, the provider fails,
/// or the step cannot be made small enough to meet the tolerance.
pub fn propagate<P, Obs>(
    provider: &mut P,
    initial: Vec<f64>,
    span: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    P: DerivativeProvider,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config.validate()?;
    if !span.is_finite() {
        return Err(Error::NonFiniteSpan(span));
    }

    let mut abm = AdamsBashforthMoulton::new(config.order, initial, first_step(config, span))?;
    let mut progress = Progress::new(abm.state());

    let event = Event {
        step: 0,
        time: 0.0,
        step_size: abm.step_size(),
        state: abm.state(),
        error: 0.0,
        kind: StepKind::Initial,
    };
    match observer.observe(&event) {
        Some(Action::StopEarly) => {
            return Ok(progress.finish(Status::StoppedByObserver, &abm));
        }
        Some(Action::ReplaceState(state)) => abm.reset_state(&state)?,
        None => {}
    }

    let mut before = Vec::with_capacity(abm.dimension());
    let mut attempts = 0;
    loop {
        let remaining = span - progress.time;
        if remaining.abs() <= GRID_SLACK * abm.step_size().abs() {
            break;
        }

        if provider.state_changed() {
            abm.reset();
        }

        let last = remaining.abs() <= abm.step_size().abs() * (1.0 + GRID_SLACK);
        if last && remaining.abs() < abm.step_size().abs() * (1.0 - GRID_SLACK) {
            abm.set_step_size(remaining)?;
        }
        let h = abm.step_size();

        let (kind, error) = if abm.is_startup_complete() {
            abm.predict(&*provider)?;
            abm.correct(&*provider)?;
            let error = abm.estimate_error(&*provider);
            (StepKind::Multistep, finite_or_nan(abm.corrected(), error))
        } else {
            // Starter steps are taken as exact. They overwrite the state, so
            // keep the last accepted one in case the result is unusable.
            before.clear();
            before.extend_from_slice(abm.state());
            abm.fire_startup_step(&*provider)?;
            (StepKind::Startup, finite_or_nan(abm.state(), 0.0))
        };

        // Non-finite errors fail this comparison too.
        let accepted = error <= config.tolerance;
        if !accepted {
            progress.rejected += 1;
            attempts += 1;
            if kind == StepKind::Startup {
                abm.reset_state(&before)?;
            }

            match adjust_step(config, h, error, remaining) {
                Adjustment::Resize(next) => {
                    log::debug!("abm: rejected h = {h} (error {error:e}), retrying with {next}");
                    abm.set_step_size(next)?;
                }
                Adjustment::Keep | Adjustment::Underflow => {
                    return Err(Error::StepSizeUnderflow {
                        step: h,
                        time: progress.time,
                        error,
                    });
                }
            }

            if attempts >= config.max_step_attempts {
                log::warn!(
                    "abm: giving up after {attempts} rejected steps at t = {}",
                    progress.time
                );
                return Err(Error::StepAttemptsExceeded {
                    attempts,
                    time: progress.time,
                });
            }
            continue;
        }

        if kind == StepKind::Multistep {
            abm.accept();
        }
        provider.advance_epoch(h);
        attempts = 0;
        progress.advance(if last { span } else { progress.time + h }, abm.state());
        log::trace!(
            "abm: step {} to t = {} (h = {h}, error {error:e})",
            progress.steps,
            progress.time
        );

        if error > 0.0 && error < config.lower_error {
            if let Adjustment::Resize(next) = adjust_step(config, h, error, span - progress.time) {
                log::debug!("abm: error {error:e} below threshold, step {h} -> {next}");
                abm.set_step_size(next)?;
            }
        }

        let event = Event {
            step: progress.steps,
            time: progress.time,
            step_size: h,
            state: abm.state(),
            error,
            kind,
        };
        match observer.observe(&event) {
            Some(Action::StopEarly) => {
                return Ok(progress.finish(Status::StoppedByObserver, &abm));
            }
            Some(Action::ReplaceState(state)) => abm.reset_state(&state)?,
            None => {}
        }
    }

    Ok(progress.finish(Status::Complete, &abm))
}

/// Propagates without observation.
///
/// # Errors
///
/// Returns an error if the config or inputs are invalid, the provider fails,
/// or the step cannot be made small enough to meet the tolerance.
pub fn propagate_unobserved<P: DerivativeProvider>(
    provider: &mut P,
    initial: Vec<f64>,
    span: f64,
    config: &Config,
) -> Result<Solution, Error> {
    propagate(provider, initial, span, config, ())
}

/// Returns `error`, or NaN if `state` has a non-finite component.
fn finite_or_nan(state: &[f64], error: f64) -> f64 {
    if state.iter().all(|x| x.is_finite()) {
        error
    } else {
        f64::NAN
    }
}

/// Signed first step for a propagation over `span`.
///
/// In fixed mode the step is shrunk so that a whole number of steps covers
/// the span.
fn first_step(config: &Config, span: f64) -> f64 {
    if span == 0.0 {
        return config.initial_step;
    }

    let h = config.initial_step.copysign(span);
    match config.mode {
        StepMode::Variable => h,
        StepMode::Fixed if span.abs() < h.abs() => span,
        StepMode::Fixed => {
            let steps = span / h;
            let whole = steps.round();
            if (steps - whole).abs() > GRID_SLACK {
                span / (steps.floor() + 1.0)
            } else {
                span / whole
            }
        }
    }
}

/// Bookkeeping for accepted steps.
struct Progress {
    time: f64,
    steps: usize,
    rejected: usize,
    history: Vec<Sample>,
}

impl Progress {
    fn new(initial: &[f64]) -> Self {
        Self {
            time: 0.0,
            steps: 0,
            rejected: 0,
            history: vec![Sample {
                time: 0.0,
                state: initial.to_vec(),
            }],
        }
    }

    fn advance(&mut self, time: f64, state: &[f64]) {
        self.time = time;
        self.steps += 1;
        self.history.push(Sample {
            time,
            state: state.to_vec(),
        });
    }

    fn finish(self, status: Status, abm: &AdamsBashforthMoulton) -> Solution {
        Solution {
            status,
            time: self.time,
            state: abm.state().to_vec(),
            steps: self.steps,
            rejected: self.rejected,
            history: self.history,
        }
    }
}
