/// A callable model that maps an input to an output.
///
/// Root finders drive a model through an [`EquationProblem`], which maps
/// solver variables to inputs and outputs to residuals.
///
/// [`EquationProblem`]: crate::EquationProblem
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// Distance fallen from rest after `t` seconds.
    struct FreeFall {
        g: f64,
    }

    impl Model for FreeFall {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, t: &f64) -> Result<f64, Self::Error> {
            Ok(0.5 * self.g * t * t)
        }
    }

    #[test]
    fn snapshot_captures_call() {
        let model = FreeFall { g: 9.8 };
        let output = model.call(&2.0).expect("infallible");

        let snapshot = Snapshot::new(2.0, output);

        assert_eq!(snapshot, Snapshot::new(2.0, 19.6));
    }
}
