use crate::equation::Evaluation;

use super::{Solution, Status};

/// Tracks the evaluation with the smallest residual magnitude.
pub(super) struct Best<I, O> {
    eval: Evaluation<I, O, 1>,
}

impl<I, O> Best<I, O> {
    /// Starts from the better of the two bracket endpoints.
    pub(super) fn of_endpoints(left: Evaluation<I, O, 1>, right: Evaluation<I, O, 1>) -> Self {
        if left.residuals[0].abs() <= right.residuals[0].abs() {
            Self { eval: left }
        } else {
            Self { eval: right }
        }
    }

    /// Replaces the tracked evaluation if `eval` has a smaller residual.
    pub(super) fn update(&mut self, eval: Evaluation<I, O, 1>) {
        if eval.residuals[0].abs() < self.eval.residuals[0].abs() {
            self.eval = eval;
        }
    }

    pub(super) fn finish(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution::from_eval(self.eval, status, iters)
    }
}
