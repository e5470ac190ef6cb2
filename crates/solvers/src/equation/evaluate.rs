use thiserror::Error;

use stride_core::{EquationProblem, Model, Snapshot};

/// A model call made on behalf of an equation solver.
///
/// Carries the solver variables, the residuals computed from them, and the
/// model input and output behind those residuals.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

impl<I, O, const N: usize> Evaluation<I, O, N> {
    /// Returns true if every residual is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.residuals.iter().all(|r| r.is_finite())
    }
}

/// The stage of [`evaluate`] that failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// Mapping solver variables to a model input failed.
    #[error("could not build model input")]
    Input(#[source] PE),

    #[error("model call failed")]
    Model(#[source] ME),

    /// The model ran but residuals could not be computed from its output.
    #[error("could not compute residuals")]
    Residuals(#[source] PE),
}

/// Result of [`evaluate`] for a model and problem pair.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Evaluates `problem`'s residuals at `x` through `model`.
///
/// # Errors
///
/// Returns the first failing stage: input mapping, model call, or residual
/// computation.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Residuals)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}
