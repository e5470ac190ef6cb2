use std::error::Error as StdError;

use thiserror::Error;

use super::ConfigError;

/// Errors that can occur during Adams-Bashforth-Moulton propagation.
#[derive(Debug, Error)]
pub enum Error {
    /// The derivative provider failed. The accepted state is unchanged.
    #[error("derivative evaluation failed: {0}")]
    Derivative(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("state vector is empty")]
    EmptyState,

    #[error("state has {actual} components, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("step rejected {attempts} times in a row at t = {time}")]
    StepAttemptsExceeded { attempts: usize, time: f64 },

    #[error("step rejected at the minimum step size {step} (t = {time}, error {error})")]
    StepSizeUnderflow { step: f64, time: f64, error: f64 },

    #[error("step size must be finite and non-zero, got {0}")]
    NonFiniteStepSize(f64),

    #[error("propagation span must be finite, got {0}")]
    NonFiniteSpan(f64),
}

impl Error {
    pub(crate) fn derivative<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Derivative(Box::new(err))
    }
}
