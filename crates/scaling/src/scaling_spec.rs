//! Reusable bundle of climatology, baseline window and method.

use chrono::NaiveDate;

use crate::error::ScalingError;
use crate::method::ScalingMethod;
use crate::result::ScalingResult;
use crate::series::DatedSeries;

/// Everything [`crate::scale`] needs besides the series itself, so the same
/// conditioning can be applied to several samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingSpec {
    climatology: DatedSeries,
    baseline_start: NaiveDate,
    baseline_end: NaiveDate,
    method: ScalingMethod,
}

impl ScalingSpec {
    /// Creates a new spec. Window and method are checked when applied.
    pub fn new(
        climatology: DatedSeries,
        baseline_start: NaiveDate,
        baseline_end: NaiveDate,
        method: ScalingMethod,
    ) -> Self {
        Self {
            climatology,
            baseline_start,
            baseline_end,
            method,
        }
    }

    /// Reference climatology.
    pub fn climatology(&self) -> &DatedSeries {
        &self.climatology
    }

    /// Inclusive baseline window.
    pub fn baseline_window(&self) -> (NaiveDate, NaiveDate) {
        (self.baseline_start, self.baseline_end)
    }

    /// Scaling method.
    pub fn method(&self) -> ScalingMethod {
        self.method
    }

    /// Scales `series` with this spec; see [`crate::scale`].
    pub fn apply(&self, series: &[f64]) -> Result<ScalingResult, ScalingError> {
        crate::scale(
            series,
            &self.climatology,
            self.baseline_start,
            self.baseline_end,
            self.method,
        )
    }
}
