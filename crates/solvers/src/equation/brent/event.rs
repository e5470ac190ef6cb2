use crate::equation::Evaluation;

/// Control actions supported by the Brent-Dekker solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the best solution found so far.
    StopEarly,
}

/// Iteration event emitted by the Brent-Dekker solver.
///
/// One event is emitted per interior evaluation. Endpoint evaluations are
/// not observed.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Bracket between the best point and the contrapoint before this
    /// evaluation.
    pub bracket: [f64; 2],

    /// Evaluation at the abscissa chosen by this iteration.
    pub eval: &'a Evaluation<I, O, 1>,
}

impl<I, O> Event<'_, I, O> {
    /// Returns the evaluated x value.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.eval.x[0]
    }

    /// Returns the residual at the evaluated x.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.eval.residuals[0]
    }
}
