//! Tail probabilities of the reference distributions used by the tests.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

/// Two-sided p-value of a standard normal test statistic.
///
/// Returns `NaN` for a non-finite statistic.
#[must_use]
pub fn normal_two_sided_p(z: f64) -> f64 {
    if !z.is_finite() {
        return f64::NAN;
    }
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return f64::NAN;
    };
    let p = 2.0 * (1.0 - normal.cdf(z.abs()));
    p.clamp(0.0, 1.0)
}

/// Upper-tail probability `P(X >= x)` of a chi-square distribution.
///
/// Returns `NaN` for a non-finite statistic or non-positive degrees of freedom.
#[must_use]
pub fn chi_square_upper_tail(x: f64, dof: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let Ok(dist) = ChiSquared::new(dof) else {
        return f64::NAN;
    };
    (1.0 - dist.cdf(x.max(0.0))).clamp(0.0, 1.0)
}
