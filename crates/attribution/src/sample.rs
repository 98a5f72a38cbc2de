//! Labelled input samples.

use climattr_distribution::Family;
use climattr_scaling::{ScalingError, ScalingSpec};

use crate::error::AttributionError;

/// Ordered observations of one scenario, e.g. annual maxima under factual
/// forcing. The label names the sample in errors and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    label: String,
    values: Vec<f64>,
}

impl Sample {
    /// Wraps `values` under `label`. No validation happens here; the
    /// requirements depend on the family the sample is fitted with.
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Sample labelled `"factual"`.
    pub fn factual(values: Vec<f64>) -> Self {
        Self::new("factual", values)
    }

    /// Sample labelled `"counterfactual"`.
    pub fn counterfactual(values: Vec<f64>) -> Self {
        Self::new("counterfactual", values)
    }

    /// Label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the sample holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks that the sample can be fitted with `family`.
    ///
    /// # Errors
    ///
    /// [`AttributionError::InvalidSample`] naming this sample's label.
    pub fn validate(&self, family: Family) -> Result<(), AttributionError> {
        family
            .validate_sample(&self.values)
            .map_err(|e| AttributionError::for_sample(&self.label, e))
    }

    /// Returns a copy expressed relative to the baseline of `spec`, keeping
    /// the label.
    pub fn scaled(&self, spec: &ScalingSpec) -> Result<Sample, ScalingError> {
        let result = spec.apply(&self.values)?;
        Ok(Sample::new(self.label.clone(), result.into_adjusted()))
    }

    /// Values at `indices`, in index order.
    pub(crate) fn pick(&self, indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| self.values[i]).collect()
    }
}
