use thiserror::Error;

use super::Order;

/// How [`propagate`](super::propagate) chooses step sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepMode {
    /// Resize freely within `[min_step, max_step]` to hold the error near
    /// `target_error`, and shorten the last step to land on the end time.
    #[default]
    Variable,

    /// Divide the span into equal steps and only ever halve or double them,
    /// so that every step boundary stays on the original grid.
    Fixed,
}

/// Configuration for Adams-Bashforth-Moulton propagation.
///
/// Step sizes are magnitudes; the propagation direction comes from the span.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub order: Order,
    pub mode: StepMode,
    pub initial_step: f64,
    pub min_step: f64,
    pub max_step: f64,

    /// Largest error estimate at which a step is accepted.
    pub tolerance: f64,

    /// Error estimates below this (but above zero) let the step grow.
    pub lower_error: f64,

    /// Error the step adaptation aims for.
    pub target_error: f64,

    /// Consecutive rejected steps allowed before giving up.
    pub max_step_attempts: usize,
}

/// Errors that can occur when validating an ABM config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step sizes must be finite and positive")]
    StepSize,

    #[error("min_step must not exceed max_step")]
    StepRange,

    #[error("initial_step must lie within [min_step, max_step]")]
    InitialStep,

    #[error("error thresholds must be finite and positive")]
    Threshold,

    #[error("lower_error and target_error must not exceed tolerance")]
    ThresholdOrder,

    #[error("max_step_attempts must be at least one")]
    Attempts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: Order::Four,
            mode: StepMode::Variable,
            initial_step: 60.0,
            min_step: 1e-3,
            max_step: 2700.0,
            tolerance: 1e-10,
            lower_error: 1e-13,
            target_error: 1e-11,
            max_step_attempts: 50,
        }
    }
}

impl Config {
    /// Checks that the step limits and thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if ![self.initial_step, self.min_step, self.max_step]
            .into_iter()
            .all(positive)
        {
            return Err(ConfigError::StepSize);
        }
        if self.min_step > self.max_step {
            return Err(ConfigError::StepRange);
        }
        if self.initial_step < self.min_step || self.initial_step > self.max_step {
            return Err(ConfigError::InitialStep);
        }

        if ![self.tolerance, self.lower_error, self.target_error]
            .into_iter()
            .all(positive)
        {
            return Err(ConfigError::Threshold);
        }
        if self.lower_error > self.tolerance || self.target_error > self.tolerance {
            return Err(ConfigError::ThresholdOrder);
        }

        if self.max_step_attempts == 0 {
            return Err(ConfigError::Attempts);
        }

        Ok(())
    }

    /// Returns a fixed-step config that takes steps of `step` with the
    /// given acceptance tolerance.
    #[must_use]
    pub fn fixed(step: f64, tolerance: f64) -> Self {
        Self {
            mode: StepMode::Fixed,
            initial_step: step,
            min_step: step.min(Self::default().min_step),
            max_step: step.max(Self::default().max_step),
            tolerance,
            lower_error: tolerance * 1e-3,
            target_error: tolerance * 0.1,
            ..Self::default()
        }
    }
}
