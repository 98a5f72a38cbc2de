//! Rescaling of samples to unit spread before numerical optimisation.

use crate::error::DistributionError;
use crate::family::Family;

/// Relative spread under which a sample is treated as constant.
const MIN_RELATIVE_SPREAD: f64 = 1e-10;

/// A sample mapped to `(x - shift) / spread`, with the inverse mappings for
/// fitted location and scale parameters.
#[derive(Debug, Clone)]
pub(crate) struct Standardized {
    family: Family,
    n: usize,
    shift: f64,
    spread: f64,
    values: Vec<f64>,
}

impl Standardized {
    /// Centres on the sample mean and divides by the sample standard
    /// deviation (location-scale families).
    pub(crate) fn location_scale(family: Family, values: &[f64]) -> Result<Self, DistributionError> {
        let mean = climattr_stats::mean(values);
        let sd = climattr_stats::sd(values);
        check_spread(family, values.len(), mean, sd)?;
        Ok(Self::build(family, values, mean, sd))
    }

    /// Divides by the sample mean without shifting (scale families with
    /// support on x > 0).
    pub(crate) fn scale_only(family: Family, values: &[f64]) -> Result<Self, DistributionError> {
        let mean = climattr_stats::mean(values);
        let sd = climattr_stats::sd(values);
        check_spread(family, values.len(), mean, sd)?;
        Ok(Self::build(family, values, 0.0, mean))
    }

    fn build(family: Family, values: &[f64], shift: f64, spread: f64) -> Self {
        Self {
            family,
            n: values.len(),
            shift,
            spread,
            values: values.iter().map(|&x| (x - shift) / spread).collect(),
        }
    }

    /// Standardised values.
    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }

    /// Maps a standardised location back to data units.
    pub(crate) fn unshift(&self, loc: f64) -> f64 {
        self.shift + self.spread * loc
    }

    /// Maps a standardised scale back to data units.
    pub(crate) fn unscale(&self, scale: f64) -> f64 {
        self.spread * scale
    }

    pub(crate) fn no_start(&self) -> DistributionError {
        DistributionError::FitConvergence {
            family: self.family,
            n: self.n,
            reason: "no valid starting point from moments".to_string(),
        }
    }

    pub(crate) fn out_of_domain(&self, params: &[f64]) -> DistributionError {
        DistributionError::FitConvergence {
            family: self.family,
            n: self.n,
            reason: format!("estimates outside the valid domain: {params:?}"),
        }
    }
}

fn check_spread(family: Family, n: usize, mean: f64, sd: f64) -> Result<(), DistributionError> {
    if !(sd > MIN_RELATIVE_SPREAD * mean.abs().max(1.0)) {
        return Err(DistributionError::FitConvergence {
            family,
            n,
            reason: format!("sample has zero spread (all values near {mean})"),
        });
    }
    Ok(())
}
