//! Descriptive statistics and percentiles shared by the climattr crates.
//!
//! Everything here works on plain `f64` slices. Functions that take a
//! `sorted` argument expect ascending order and do not check it.

/// Arithmetic mean. Empty input gives 0.0.
pub fn mean(data: &[f64]) -> f64 {
    match data.len() {
        0 => 0.0,
        n => data.iter().sum::<f64>() / n as f64,
    }
}

/// Sum of squared deviations from the mean.
fn sum_sq_dev(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m).powi(2)).sum()
}

/// Unbiased sample variance (denominator `n - 1`). Fewer than two values
/// give 0.0.
pub fn variance(data: &[f64]) -> f64 {
    match data.len() {
        0 | 1 => 0.0,
        n => sum_sq_dev(data) / (n - 1) as f64,
    }
}

/// Population variance (denominator `n`), the maximum-likelihood variance
/// of a Normal sample. Empty input gives 0.0.
pub fn population_variance(data: &[f64]) -> f64 {
    match data.len() {
        0 => 0.0,
        n => sum_sq_dev(data) / n as f64,
    }
}

/// Square root of [`variance`].
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Ascending copy of `data` under IEEE total ordering.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Percentile with linear interpolation between order statistics
/// (Hyndman-Fan type 7, numpy's default).
///
/// # Panics
///
/// If `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let last = sorted
        .len()
        .checked_sub(1)
        .unwrap_or_else(|| panic!("quantile of an empty slice"));
    let h = last as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(last);
    sorted[lo] + h.fract() * (sorted[hi] - sorted[lo])
}

/// Middle value of `sorted`; the mean of the two middle values for even
/// lengths.
///
/// # Panics
///
/// If `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    quantile_type7(sorted, 0.5)
}

/// Lower and upper percentile probabilities of a symmetric two-sided
/// interval, e.g. `(0.025, 0.975)` for `confidence_level = 0.95`.
pub fn two_sided_bounds(confidence_level: f64) -> (f64, f64) {
    let tail = (1.0 - confidence_level) / 2.0;
    (tail, 1.0 - tail)
}
