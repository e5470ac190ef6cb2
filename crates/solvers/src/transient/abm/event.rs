/// What produced a propagation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The initial state, before any step.
    Initial,

    /// A fixed starter step taken while filling the derivative history.
    Startup,

    /// A predictor-corrector step.
    Multistep,
}

/// Control actions supported by [`propagate`](super::propagate).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Stop and return the solution so far.
    StopEarly,

    /// Continue from this state instead of the accepted one.
    ///
    /// Used for impulsive changes such as a maneuver. The derivative history
    /// no longer describes the new trajectory, so the integrator restarts.
    ReplaceState(Vec<f64>),
}

/// Event emitted by [`propagate`](super::propagate) after each accepted step.
///
/// Step 0 is the initial state.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Accepted step count.
    pub step: usize,

    /// Elapsed time since the start of the propagation.
    pub time: f64,

    /// Signed size of the step just taken (the planned first step for
    /// step 0).
    pub step_size: f64,

    pub state: &'a [f64],

    /// Error estimate of the step; zero for starter steps.
    pub error: f64,

    pub kind: StepKind,
}
