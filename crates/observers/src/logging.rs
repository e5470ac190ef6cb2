use std::fmt::Debug;

use log::Level;

use stride_core::Observer;

/// An observer that writes solver events to the [`log`] facade.
///
/// Every event is formatted with its `Debug` impl. The observer never
/// returns an action, so it can watch any solver whose events implement
/// `Debug`. Nothing is printed unless the application installs a logger.
///
/// # Example
///
/// ```ignore
/// let mut logger = LogObserver::new(log::Level::Info).every(10);
/// abm::propagate(&mut provider, state, span, &config, &mut logger)?;
/// println!("{} events, {} logged", logger.seen(), logger.logged());
/// ```
#[derive(Debug, Clone)]
pub struct LogObserver {
    level: Level,
    target: &'static str,
    every: usize,
    seen: usize,
    logged: usize,
}

impl LogObserver {
    /// Creates an observer that logs every event at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            target: "stride",
            every: 1,
            seen: 0,
            logged: 0,
        }
    }

    /// Sets the log target.
    #[must_use]
    pub fn target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Logs only every `n`th event, starting with the first.
    #[must_use]
    pub fn every(mut self, n: usize) -> Self {
        self.every = n.max(1);
        self
    }

    /// Number of events observed.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Number of events passed to the logger.
    #[must_use]
    pub fn logged(&self) -> usize {
        self.logged
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl<E: Debug, A> Observer<E, A> for LogObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.seen % self.every == 0 {
            log::log!(target: self.target, self.level, "{event:?}");
            self.logged += 1;
        }
        self.seen += 1;
        None
    }
}

/// Allows `&mut LogObserver` to be passed to solvers that take an observer
/// by value, so the counters can be read after the solve.
impl<E: Debug, A> Observer<E, A> for &mut LogObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}
