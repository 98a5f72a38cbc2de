//! Normal distribution parameters and closed-form fit.

use serde::Serialize;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::error::DistributionError;
use crate::family::Family;
use crate::model::DistributionModel;

/// Validated Normal parameters (location/scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalParams {
    loc: f64,
    scale: f64,
    #[serde(skip)]
    dist: Normal,
}

impl NormalParams {
    /// Creates parameters after checking that `loc` is finite and `scale`
    /// is finite and strictly positive.
    pub fn new(loc: f64, scale: f64) -> Option<Self> {
        if !loc.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let dist = Normal::new(loc, scale).ok()?;
        Some(Self { loc, scale, dist })
    }

    /// Location (mean).
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale (standard deviation).
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl DistributionModel for NormalParams {
    fn cdf(&self, x: f64) -> f64 {
        self.dist.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.dist.sf(x)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        self.dist.ln_pdf(x)
    }

    fn quantile(&self, p: f64) -> f64 {
        // statrs panics outside [0, 1]
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.dist.inverse_cdf(p)
    }
}

/// Maximum-likelihood Normal fit: sample mean and population standard
/// deviation (N denominator).
pub(crate) fn fit_normal(values: &[f64]) -> Result<NormalParams, DistributionError> {
    let loc = climattr_stats::mean(values);
    let scale = climattr_stats::population_variance(values).sqrt();
    if scale <= f64::EPSILON * loc.abs().max(1.0) {
        return Err(DistributionError::FitConvergence {
            family: Family::Normal,
            n: values.len(),
            reason: format!("sample has zero spread (all values equal {loc})"),
        });
    }
    NormalParams::new(loc, scale).ok_or_else(|| DistributionError::FitConvergence {
        family: Family::Normal,
        n: values.len(),
        reason: format!("estimates outside the valid domain (loc={loc}, scale={scale})"),
    })
}
