//! Log-linear least-squares trend fit.
//!
//! We model exponential growth (or decay) in y as a straight line in log
//! space:
//!
//! ```text
//! log10(y_i) = slope * x_i + intercept
//! ```
//!
//! and solve the two-parameter least-squares problem with an SVD. The design
//! matrix is tall (n rows, 2 columns), so SVD keeps the solve robust even
//! when the x values are nearly degenerate, and the parameter dimension is
//! tiny so performance is a non-issue.

use nalgebra::{DMatrix, DVector};

use crate::domain::{LoadedSeries, TimeUnit};
use crate::error::AppError;

/// Fitted exponential trend: `y(x) = 10^(slope * x + intercept)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    /// Trend value at `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        10f64.powf(self.slope * x + self.intercept)
    }

    /// Time for y to double, in the unit's doubling scale.
    ///
    /// For year-based series this is months (`12 * log10(2) / slope`); for
    /// million-year series it is million years (`log10(2) / slope`). A zero
    /// slope yields `inf`; callers surface that as-is.
    pub fn doubling_time(&self, unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Years => 12.0 * 2f64.log10() / self.slope,
            TimeUnit::MillionYears => 2f64.log10() / self.slope,
        }
    }

    /// Compounded percentage increase per year implied by the slope.
    ///
    /// One unit of x is one year for `Years`; for `MillionYears` the
    /// per-unit increase is scaled down by `1e6`.
    pub fn annual_increase_pct(&self, unit: TimeUnit) -> f64 {
        let per_unit = 100.0 * (10f64.powf(self.slope) - 1.0);
        match unit {
            TimeUnit::Years => per_unit,
            TimeUnit::MillionYears => per_unit / 1.0e6,
        }
    }
}

/// Fit the exponential trend of a loaded series.
///
/// Requires at least two points and strictly positive, finite y values
/// (log-scale precondition).
pub fn fit_log_trend(series: &LoadedSeries) -> Result<TrendFit, AppError> {
    let n = series.len();
    if n < 2 {
        return Err(AppError::new(
            3,
            format!("Need at least 2 points to fit a trend, got {n}."),
        ));
    }

    for (&x, &y) in series.x.iter().zip(&series.y) {
        if !x.is_finite() {
            return Err(AppError::new(3, format!("Non-finite x value {x}.")));
        }
        if !y.is_finite() || y <= 0.0 {
            return Err(AppError::new(
                3,
                format!("y values must be positive and finite for a log-scale fit, got {y}."),
            ));
        }
    }

    // Design matrix [1, x] against log10(y).
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { series.x[i] });
    let rhs = DVector::from_iterator(n, series.y.iter().map(|y| y.log10()));

    let svd = design.svd(true, true);
    let beta = svd
        .solve(&rhs, 1.0e-12)
        .map_err(|e| AppError::new(4, format!("Trend fit failed: {e}")))?;

    let fit = TrendFit {
        intercept: beta[0],
        slope: beta[1],
    };
    if !fit.slope.is_finite() || !fit.intercept.is_finite() {
        return Err(AppError::new(4, "Trend fit produced non-finite parameters."));
    }
    Ok(fit)
}
