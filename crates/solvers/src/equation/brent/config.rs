use thiserror::Error;

/// Configuration for the Brent-Dekker solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    max_iters: usize,
    tolerance: f64,
}

/// Errors that can occur when validating a Brent-Dekker solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and non-negative")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 1e-12,
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// The tolerance is an absolute bound on the bracket half-width; the
    /// solver adds a machine-epsilon term scaled by the current iterate.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn new(max_iters: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            max_iters,
            tolerance,
        })
    }

    /// Returns the maximum number of function evaluations after the endpoints.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the absolute x tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
