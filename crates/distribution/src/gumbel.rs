//! Gumbel (type I extreme value, maxima form) parameters and MLE.

use serde::Serialize;

use crate::error::DistributionError;
use crate::family::Family;
use crate::model::DistributionModel;
use crate::optimizer::{self, PENALTY};
use crate::standardize::Standardized;

/// Euler-Mascheroni constant.
pub(crate) const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Validated Gumbel parameters with `F(x) = exp(-exp(-(x - loc) / scale))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GumbelParams {
    loc: f64,
    scale: f64,
}

impl GumbelParams {
    /// Creates parameters after checking that `loc` is finite and `scale`
    /// is finite and strictly positive.
    pub fn new(loc: f64, scale: f64) -> Option<Self> {
        if loc.is_finite() && scale.is_finite() && scale > 0.0 {
            Some(Self { loc, scale })
        } else {
            None
        }
    }

    /// Method-of-moments estimate: `scale = sd * sqrt(6) / pi`,
    /// `loc = mean - gamma * scale`.
    pub fn from_moments(mean: f64, sd: f64) -> Option<Self> {
        let scale = sd * 6f64.sqrt() / std::f64::consts::PI;
        Self::new(mean - EULER_GAMMA * scale, scale)
    }

    /// Location (mode).
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.loc) / self.scale
    }
}

impl DistributionModel for GumbelParams {
    fn cdf(&self, x: f64) -> f64 {
        (-(-self.z(x)).exp()).exp()
    }

    fn sf(&self, x: f64) -> f64 {
        -(-(-self.z(x)).exp()).exp_m1()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let z = self.z(x);
        -self.scale.ln() - z - (-z).exp()
    }

    fn quantile(&self, p: f64) -> f64 {
        self.loc - self.scale * (-p.ln()).ln()
    }
}

/// Negative log-likelihood over `theta = (loc, ln scale)`.
pub(crate) fn gumbel_nll(theta: &[f64], data: &[f64]) -> f64 {
    let (loc, ln_scale) = (theta[0], theta[1]);
    let scale = ln_scale.exp();
    if !scale.is_finite() || scale <= 0.0 {
        return PENALTY;
    }
    let n = data.len() as f64;
    let mut sum = 0.0;
    for &x in data {
        let z = (x - loc) / scale;
        sum += z + (-z).exp();
    }
    n * ln_scale + sum
}

/// Fits a Gumbel distribution by maximum likelihood.
pub(crate) fn fit_gumbel(values: &[f64]) -> Result<GumbelParams, DistributionError> {
    let std = Standardized::location_scale(Family::Gumbel, values)?;
    let start = GumbelParams::from_moments(0.0, 1.0).ok_or_else(|| std.no_start())?;
    let theta = optimizer::minimize(
        Family::Gumbel,
        std.values(),
        &[start.loc(), start.scale().ln()],
        &[0.1, 0.1],
        gumbel_nll,
    )?;
    let loc = std.unshift(theta[0]);
    let scale = std.unscale(theta[1].exp());
    GumbelParams::new(loc, scale).ok_or_else(|| std.out_of_domain(&[loc, scale]))
}
