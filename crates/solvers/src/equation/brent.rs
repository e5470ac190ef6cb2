//! Brent-Dekker root finding on a bracketed interval.
//!
//! # Algorithm
//!
//! The solver keeps a bracket `[b, c]` whose function values have opposite
//! signs, with `b` the best estimate so far. Each iteration tries inverse
//! quadratic interpolation through the last three points (or the secant
//! through two when only two are distinct) and accepts the step only when it
//! stays well inside the bracket and shrinks faster than the step before the
//! last. Otherwise it bisects. This gives superlinear convergence on smooth
//! functions and never does worse than bisection.
//!
//! The search itself is the [`BrentDekker`] state machine, which can be driven
//! directly by code that evaluates its own function (for example an event
//! locator inside an integrator). [`solve`] drives it against a [`Model`] and
//! an [`EquationProblem<1>`], validating the bracket first.
//!
//! # Observer Events
//!
//! [`solve`] emits one [`Event`] per interior evaluation. Observers can return
//! [`Action::StopEarly`] to finish with the best evaluation so far.

mod best;
mod config;
mod error;
mod event;
mod solution;
mod zero;


pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Action, Event};
pub use solution::{Solution, Status};
pub use zero::{BrentDekker, Phase};

use stride_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use best::Best;

/// Finds a root of the equation on `bracket` using Brent-Dekker.
///
/// The bracket may be given in either order. Its endpoints must be finite,
/// distinct, and have residuals of opposite sign (or one of them zero).
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is not finite,
/// or the model or problem fails during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let (left, right) = validate_bracket(bracket)?;

    let left_eval = evaluate_finite(model, problem, left)?;
    let left_residual = left_eval.residuals[0];
    if left_residual == 0.0 {
        return Ok(Solution::from_eval(left_eval, Status::Converged, 0));
    }

    let right_eval = evaluate_finite(model, problem, right)?;
    let right_residual = right_eval.residuals[0];
    if right_residual == 0.0 {
        return Ok(Solution::from_eval(right_eval, Status::Converged, 0));
    }

    if left_residual.signum() == right_residual.signum() {
        return Err(Error::NoBracket {
            left,
            right,
            left_residual,
            right_residual,
        });
    }

    let mut zero = BrentDekker::new(
        left,
        right,
        left_residual,
        right_residual,
        config.tolerance(),
    );
    let mut best = Best::of_endpoints(left_eval, right_eval);
    let (mut x, mut fx) = (right, right_residual);

    for iter in 1..=config.max_iters() {
        let bracket = zero.bracket();
        x = zero.find_step(x, fx);
        if zero.is_converged() {
            log::debug!("brent: converged to {x} after {} iterations", iter - 1);
            return Ok(best.finish(Status::Converged, iter - 1));
        }

        let eval = evaluate_finite(model, problem, x)?;
        fx = eval.residuals[0];

        let event = Event {
            iter,
            bracket,
            eval: &eval,
        };
        let action = observer.observe(&event);

        best.update(eval);

        if let Some(Action::StopEarly) = action {
            return Ok(best.finish(Status::StoppedByObserver, iter));
        }
    }

    // The last evaluation may have closed the bracket.
    zero.find_step(x, fx);
    if zero.is_converged() {
        return Ok(best.finish(Status::Converged, config.max_iters()));
    }

    log::warn!(
        "brent: no convergence after {} iterations, bracket {:?}",
        config.max_iters(),
        zero.bracket()
    );
    Ok(best.finish(Status::MaxIters, config.max_iters()))
}

/// Runs Brent-Dekker without observation.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is not finite,
/// or the model or problem fails during evaluation.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates at `x`, rejecting non-finite residuals.
fn evaluate_finite<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x])?;
    if !eval.is_finite() {
        return Err(Error::NonFiniteResidual {
            x,
            residual: eval.residuals[0],
        });
    }
    Ok(eval)
}

/// Validates bracket values and returns them in normalized (left < right) order.
fn validate_bracket(bracket: [f64; 2]) -> Result<(f64, f64), Error> {
    let [left, right] = bracket;

    if !left.is_finite() {
        return Err(Error::NonFiniteBracket { value: left });
    }

    if !right.is_finite() {
        return Err(Error::NonFiniteBracket { value: right });
    }

    #[allow(clippy::float_cmp)]
    if left == right {
        return Err(Error::ZeroWidthBracket { value: left });
    }

    if left < right {
        Ok((left, right))
    } else {
        Ok((right, left))
    }
}
