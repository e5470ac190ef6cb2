/// Indicates how propagation terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the requested span.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// An accepted state and its elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub state: Vec<f64>,
}

/// The result of an Adams-Bashforth-Moulton propagation.
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: Status,

    /// Elapsed time of the final state.
    pub time: f64,

    /// Final state.
    pub state: Vec<f64>,

    /// Accepted steps, starter steps included.
    pub steps: usize,

    /// Rejected step attempts.
    pub rejected: usize,

    /// Every accepted state, starting with the initial one.
    pub history: Vec<Sample>,
}
