/// Progress of a [`BrentDekker`] search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A bracket has been set but no step has been taken.
    Initialized,
    /// Steps are being taken toward the root.
    Iterating,
    /// The bracket half-width fell within tolerance or an exact root was hit.
    Converged,
}

/// Brent-Dekker zero finder driven one function value at a time.
///
/// The caller owns the function. After [`set_interval`] it repeatedly passes
/// the latest abscissa and function value to [`find_step`], evaluates the
/// function at the returned abscissa, and stops once [`is_converged`] holds:
///
/// ```
/// use stride_solvers::equation::brent::BrentDekker;
///
/// let f = |x: f64| 3.0 * x.powi(3) - x * x + 7.0 * x - 6.0;
///
/// let mut zero = BrentDekker::new(0.0, 1.0, f(0.0), f(1.0), 1e-9);
/// let (mut x, mut fx) = (1.0, f(1.0));
/// loop {
///     x = zero.find_step(x, fx);
///     if zero.is_converged() {
///         break;
///     }
///     fx = f(x);
/// }
/// assert!((x - 0.754_427_175).abs() < 1e-8);
/// ```
///
/// The bracket `[a, b]` passed to [`set_interval`] must contain a sign change
/// (`fa` and `fb` of opposite sign). This is not checked here; a
/// non-bracketing interval yields a meaningless result. The
/// [`solve`](super::solve) driver validates the bracket before starting.
///
/// [`set_interval`]: BrentDekker::set_interval
/// [`find_step`]: BrentDekker::find_step
/// [`is_converged`]: BrentDekker::is_converged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentDekker {
    // Previous iterate.
    a: f64,
    fa: f64,
    // Current iterate; `|fb| <= |fc|` after each step.
    b: f64,
    fb: f64,
    // Contrapoint: `fb` and `fc` never share a sign class.
    c: f64,
    fc: f64,
    // Latest step and the one before it.
    d: f64,
    e: f64,
    // Caller tolerance and the machine-epsilon scaled tolerance at `b`.
    t: f64,
    tol: f64,
    // Half-width of the bracket, measured from `b`.
    m: f64,
    phase: Phase,
}

impl BrentDekker {
    /// Creates a search over the bracket `[a, b]`.
    #[must_use]
    pub fn new(a: f64, b: f64, fa: f64, fb: f64, tolerance: f64) -> Self {
        let mut zero = Self {
            a,
            fa,
            b,
            fb,
            c: a,
            fc: fa,
            d: 0.0,
            e: 0.0,
            t: tolerance,
            tol: tolerance,
            m: 0.0,
            phase: Phase::Initialized,
        };
        zero.set_interval(a, b, fa, fb, tolerance);
        zero
    }

    /// Starts a new search over `[a, b]`, treating `a` as the previous estimate.
    pub fn set_interval(&mut self, a: f64, b: f64, fa: f64, fb: f64, tolerance: f64) {
        self.a = a;
        self.b = b;
        self.fa = fa;
        self.fb = fb;
        self.t = tolerance;
        self.swap_ac();
        self.tol = 2.0 * f64::EPSILON * self.b.abs() + self.t;
        self.m = 0.5 * (self.c - self.b);
        self.phase = Phase::Initialized;
    }

    /// Accepts the latest `(x, f(x))` pair and returns the next abscissa.
    ///
    /// Once the search has converged the returned value is the root estimate
    /// and no further evaluation is needed.
    pub fn find_step(&mut self, x: f64, fx: f64) -> f64 {
        self.b = x;
        self.fb = fx;

        if (self.fb > 0.0 && self.fc > 0.0) || (self.fb <= 0.0 && self.fc <= 0.0) {
            self.swap_ac();
        }

        if self.fc.abs() < self.fb.abs() {
            self.a = self.b;
            self.b = self.c;
            self.c = self.a;
            self.fa = self.fb;
            self.fb = self.fc;
            self.fc = self.fa;
        }

        self.tol = 2.0 * f64::EPSILON * self.b.abs() + self.t;
        self.m = 0.5 * (self.c - self.b);

        if self.is_converged() {
            self.phase = Phase::Converged;
            return self.b;
        }
        self.phase = Phase::Iterating;

        if self.e.abs() < self.tol || self.fa.abs() <= self.fb.abs() {
            self.bisect();
        } else {
            self.interpolate();
        }

        self.a = self.b;
        self.fa = self.fb;

        if self.d.abs() > self.tol {
            self.b += self.d;
        } else if self.m > 0.0 {
            self.b += self.tol;
        } else {
            self.b -= self.tol;
        }

        self.b
    }

    /// Returns true once the bracket has collapsed or an exact root was hit.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.m.abs() <= self.tol || self.fb == 0.0
    }

    /// Returns the current phase of the search.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the best evaluated point and its function value.
    ///
    /// While iterating, the current iterate has already been advanced to the
    /// next (unevaluated) abscissa, so the best point is the previous one.
    #[must_use]
    pub fn best(&self) -> (f64, f64) {
        match self.phase {
            Phase::Iterating => (self.a, self.fa),
            Phase::Initialized | Phase::Converged => (self.b, self.fb),
        }
    }

    /// Returns the contrapoint and its function value.
    #[must_use]
    pub fn contrapoint(&self) -> (f64, f64) {
        (self.c, self.fc)
    }

    /// Returns the bracket between the best point and the contrapoint.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        let (x, _) = self.best();
        if x <= self.c { [x, self.c] } else { [self.c, x] }
    }

    /// Makes `a` the contrapoint and resets the step history to the full interval.
    fn swap_ac(&mut self) {
        self.c = self.a;
        self.fc = self.fa;
        self.d = self.b - self.a;
        self.e = self.d;
    }

    fn bisect(&mut self) {
        self.d = self.m;
        self.e = self.m;
    }

    /// Secant step when only two points are distinct, inverse quadratic otherwise.
    #[allow(clippy::float_cmp)]
    fn interpolate(&mut self) {
        let s = self.fb / self.fa;

        let (mut p, mut q) = if self.a == self.c {
            (2.0 * self.m * s, 1.0 - s)
        } else {
            let q = self.fa / self.fc;
            let r = self.fb / self.fc;
            (
                s * (2.0 * self.m * q * (q - r) - (self.b - self.a) * (r - 1.0)),
                (q - 1.0) * (r - 1.0) * (s - 1.0),
            )
        };

        if p > 0.0 {
            q = -q;
        } else {
            p = -p;
        }

        let previous = self.e;
        self.e = self.d;

        if 2.0 * p < 3.0 * self.m * q - (self.tol * q).abs() && p < (0.5 * previous * q).abs() {
            self.d = p / q;
        } else {
            self.bisect();
        }
    }
}
