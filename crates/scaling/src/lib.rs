//! Additive and multiplicative scaling of a series against the mean of a
//! reference climatology over a baseline window.
//!
//! Additive scaling turns values into anomalies (`x - mean`), multiplicative
//! scaling into ratios (`x / mean`). Both are reversible with
//! [`ScalingResult::unscale`].
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use climattr_scaling::{DatedSeries, ScalingMethod, scale};
//!
//! let day = |d| NaiveDate::from_ymd_opt(1990, 7, d).unwrap();
//! let clim = DatedSeries::new(vec![day(1), day(2), day(3)], vec![20.0, 22.0, 24.0])?;
//! let result = scale(&[25.0, 19.5], &clim, day(1), day(3), ScalingMethod::Additive)?;
//! assert_eq!(result.adjusted(), &[3.0, -2.5]);
//! # Ok::<(), climattr_scaling::ScalingError>(())
//! ```

mod error;
mod method;
mod result;
mod scaling_spec;
mod series;

pub use error::ScalingError;
pub use method::ScalingMethod;
pub use result::ScalingResult;
pub use scaling_spec::ScalingSpec;
pub use series::DatedSeries;

use chrono::NaiveDate;
use tracing::debug;

/// Mean of `climatology` over the inclusive window `[start, end]`, together
/// with the number of entries it was computed from.
///
/// # Errors
///
/// - [`ScalingError::EmptyBaseline`] if no entry falls in the window
///   (including `start > end`).
/// - [`ScalingError::NonFiniteClimatology`] if an entry in the window is NaN
///   or infinite.
pub fn baseline_mean(
    climatology: &DatedSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(f64, usize), ScalingError> {
    let mut values = Vec::new();
    for (date, value) in climatology.window(start, end) {
        if !value.is_finite() {
            return Err(ScalingError::NonFiniteClimatology { date, value });
        }
        values.push(value);
    }
    if values.is_empty() {
        return Err(ScalingError::EmptyBaseline { start, end });
    }
    Ok((climattr_stats::mean(&values), values.len()))
}

/// Scales `series` against the mean of `climatology` over
/// `[baseline_start, baseline_end]`.
///
/// # Errors
///
/// - [`ScalingError::EmptySeries`] if `series` is empty.
/// - Any error from [`baseline_mean`].
/// - [`ScalingError::InvalidScalingMethod`] if multiplicative scaling meets a
///   non-positive baseline mean or a negative series value.
#[tracing::instrument(skip(series, climatology), fields(n = series.len()))]
pub fn scale(
    series: &[f64],
    climatology: &DatedSeries,
    baseline_start: NaiveDate,
    baseline_end: NaiveDate,
    method: ScalingMethod,
) -> Result<ScalingResult, ScalingError> {
    if series.is_empty() {
        return Err(ScalingError::EmptySeries);
    }
    let (mean, n_baseline) = baseline_mean(climatology, baseline_start, baseline_end)?;
    method.check_applicable(series, mean)?;

    let adjusted: Vec<f64> = series.iter().map(|&x| method.apply(x, mean)).collect();
    debug!(baseline_mean = mean, n_baseline, "scaled series");

    Ok(ScalingResult::new(
        adjusted,
        mean,
        method,
        baseline_start,
        baseline_end,
        n_baseline,
    ))
}
