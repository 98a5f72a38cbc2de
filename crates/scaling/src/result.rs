//! Result type for climatology scaling.

use chrono::NaiveDate;
use serde::Serialize;

use crate::method::ScalingMethod;

/// A scaled series together with everything needed to reverse it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingResult {
    adjusted: Vec<f64>,
    baseline_mean: f64,
    method: ScalingMethod,
    baseline_start: NaiveDate,
    baseline_end: NaiveDate,
    n_baseline: usize,
}

impl ScalingResult {
    pub(crate) fn new(
        adjusted: Vec<f64>,
        baseline_mean: f64,
        method: ScalingMethod,
        baseline_start: NaiveDate,
        baseline_end: NaiveDate,
        n_baseline: usize,
    ) -> Self {
        Self {
            adjusted,
            baseline_mean,
            method,
            baseline_start,
            baseline_end,
            n_baseline,
        }
    }

    /// Returns the scaled values.
    pub fn adjusted(&self) -> &[f64] {
        &self.adjusted
    }

    /// Consumes `self` and returns the scaled values.
    pub fn into_adjusted(self) -> Vec<f64> {
        self.adjusted
    }

    /// Mean of the climatology over the baseline window.
    pub fn baseline_mean(&self) -> f64 {
        self.baseline_mean
    }

    /// Method that was applied.
    pub fn method(&self) -> ScalingMethod {
        self.method
    }

    /// Inclusive baseline window.
    pub fn baseline_window(&self) -> (NaiveDate, NaiveDate) {
        (self.baseline_start, self.baseline_end)
    }

    /// Number of climatology entries inside the window.
    pub fn n_baseline(&self) -> usize {
        self.n_baseline
    }

    /// Maps the scaled values back to the original units.
    pub fn unscale(&self) -> Vec<f64> {
        self.adjusted
            .iter()
            .map(|&x| self.method.invert(x, self.baseline_mean))
            .collect()
    }
}
