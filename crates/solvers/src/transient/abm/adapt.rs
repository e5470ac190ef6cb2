use super::{Config, StepMode};

/// Relative slack when comparing times against the step grid.
pub(super) const GRID_SLACK: f64 = 1e-9;

/// How the step size should change after an error estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Adjustment {
    Keep,
    Resize(f64),

    /// The step was rejected and cannot shrink any further.
    Underflow,
}

/// Picks the next step size from the error estimate of a step of size `h`.
///
/// `remaining` is the signed time left in the span after the step (or before
/// it, for a rejected step).
///
/// A non-finite error says nothing about how far off the step was, so the
/// step is halved instead of scaled.
pub(super) fn adjust_step(config: &Config, h: f64, error: f64, remaining: f64) -> Adjustment {
    if !error.is_finite() {
        return halve(config, h);
    }

    let rejected = error > config.tolerance;
    let scaled = (h.abs() * (config.target_error / error).powf(config.order.inv_order()))
        .clamp(config.min_step, config.max_step);

    let step = match config.mode {
        StepMode::Variable if rejected && h.abs() <= config.min_step => {
            return Adjustment::Underflow;
        }
        StepMode::Variable if rejected => scaled,
        StepMode::Variable => scaled.min(2.0 * h.abs()),
        StepMode::Fixed => on_grid(config, h.abs(), scaled, remaining),
    };

    if rejected && step >= h.abs() {
        Adjustment::Underflow
    } else if step == h.abs() {
        Adjustment::Keep
    } else {
        Adjustment::Resize(h.signum() * step)
    }
}

/// Halves a rejected step, never going below the minimum step.
///
/// Fixed-mode steps stay powers of two of the grid step, so they underflow
/// rather than being clamped to the minimum.
fn halve(config: &Config, h: f64) -> Adjustment {
    let half = h.abs() / 2.0;
    let too_small = match config.mode {
        StepMode::Variable => h.abs() <= config.min_step,
        StepMode::Fixed => half < config.min_step,
    };

    if too_small {
        Adjustment::Underflow
    } else {
        Adjustment::Resize(h.signum() * half.max(config.min_step))
    }
}

/// Moves `step` toward `scaled` by powers of two.
///
/// Growth only happens when the doubled step still divides the remaining
/// interval, so fixed-mode steps keep landing on the end time.
fn on_grid(config: &Config, step: f64, scaled: f64, remaining: f64) -> f64 {
    if scaled < step {
        let mut halved = step;
        while halved > scaled {
            halved /= 2.0;
        }
        while halved < config.min_step {
            halved *= 2.0;
        }
        return halved;
    }

    if scaled >= 2.0 * step {
        let steps_to_go = remaining.abs() / (2.0 * step);
        if steps_to_go.round() >= 1.0 && (steps_to_go - steps_to_go.round()).abs() < GRID_SLACK {
            return 2.0 * step;
        }
    }

    step
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn resized(adjustment: Adjustment) -> f64 {
        match adjustment {
            Adjustment::Resize(h) => h,
            other => panic!("expected a resize, got {other:?}"),
        }
    }

    fn fixed() -> Config {
        Config {
            mode: StepMode::Fixed,
            ..Config::default()
        }
    }

    #[test]
    fn variable_rejection_scales_by_error_ratio() {
        let config = Config::default();

        let h = resized(adjust_step(&config, 60.0, 1e-9, 1000.0));
        assert_relative_eq!(h, 60.0 * 0.01_f64.powf(0.2), epsilon = 1e-12);

        let h = resized(adjust_step(&config, -60.0, 1e-9, -1000.0));
        assert_relative_eq!(h, -60.0 * 0.01_f64.powf(0.2), epsilon = 1e-12);
    }

    #[test]
    fn variable_growth_is_capped_at_double() {
        let config = Config::default();
        let h = resized(adjust_step(&config, 60.0, 1e-15, 1000.0));
        assert_relative_eq!(h, 120.0);
    }

    #[test]
    fn variable_growth_stops_at_max_step() {
        let config = Config::default();
        assert_eq!(
            adjust_step(&config, config.max_step, 1e-15, 1e5),
            Adjustment::Keep
        );
    }

    #[test]
    fn variable_rejection_at_min_step_underflows() {
        let config = Config::default();
        assert_eq!(
            adjust_step(&config, config.min_step, 1e-6, 10.0),
            Adjustment::Underflow
        );
    }

    #[test]
    fn fixed_rejection_halves() {
        // Scaled step is about 3.18, so 8 halves twice.
        let h = resized(adjust_step(&fixed(), 8.0, 1e-9, 64.0));
        assert_relative_eq!(h, 2.0);
    }

    #[test]
    fn fixed_growth_needs_divisible_remainder() {
        let h = resized(adjust_step(&fixed(), 8.0, 1e-15, 32.0));
        assert_relative_eq!(h, 16.0);

        assert_eq!(adjust_step(&fixed(), 8.0, 1e-15, 24.0), Adjustment::Keep);
    }

    #[test]
    fn non_finite_error_halves_the_step() {
        let config = Config::default();
        for error in [f64::NAN, f64::INFINITY] {
            let h = resized(adjust_step(&config, 60.0, error, 1000.0));
            assert_relative_eq!(h, 30.0);

            let h = resized(adjust_step(&config, -60.0, error, -1000.0));
            assert_relative_eq!(h, -30.0);
        }

        let h = resized(adjust_step(&fixed(), 8.0, f64::NAN, 64.0));
        assert_relative_eq!(h, 4.0);
    }

    #[test]
    fn non_finite_error_respects_min_step() {
        let config = Config::default();

        let h = resized(adjust_step(&config, 1.5e-3, f64::NAN, 1.0));
        assert_relative_eq!(h, config.min_step);

        assert_eq!(
            adjust_step(&config, config.min_step, f64::NAN, 1.0),
            Adjustment::Underflow
        );
        assert_eq!(
            adjust_step(&fixed(), 1.5e-3, f64::NAN, 1.0),
            Adjustment::Underflow
        );
    }

    #[test]
    fn fixed_rejection_at_min_step_underflows() {
        let config = fixed();
        assert_eq!(
            adjust_step(&config, config.min_step, 1e-6, 1.0),
            Adjustment::Underflow
        );
    }
}
