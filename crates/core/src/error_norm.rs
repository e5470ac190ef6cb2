//! Reductions from per-component local error estimates to a scalar.
//!
//! [`DerivativeProvider::estimate_error`] uses [`max_absolute`] by default.
//! Providers whose state components span several orders of magnitude (a
//! position in meters next to a velocity in meters per second) usually want
//! [`max_relative`] instead.
//!
//! [`DerivativeProvider::estimate_error`]: crate::DerivativeProvider::estimate_error

/// Returns the largest error component, or `0.0` for an empty slice.
///
/// A NaN component makes the result NaN, so a step whose estimate was
/// poisoned can never look accurate.
#[must_use]
pub fn max_absolute(errors: &[f64]) -> f64 {
    errors.iter().map(|e| e.abs()).fold(0.0, nan_max)
}

/// Returns the largest error component relative to its reference value.
///
/// Components whose reference magnitude is at or below `threshold` are
/// compared absolutely, which keeps components that pass through zero from
/// dominating the reduction. As with [`max_absolute`], NaN propagates.
#[must_use]
pub fn max_relative(errors: &[f64], reference: &[f64], threshold: f64) -> f64 {
    errors
        .iter()
        .zip(reference)
        .map(|(e, r)| {
            if r.abs() > threshold {
                (e / r).abs()
            } else {
                e.abs()
            }
        })
        .fold(0.0, nan_max)
}

/// `f64::max` that keeps NaN instead of discarding it.
fn nan_max(max: f64, e: f64) -> f64 {
    if max.is_nan() || e.is_nan() {
        f64::NAN
    } else {
        max.max(e)
    }
}
