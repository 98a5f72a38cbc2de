//! Gamma distribution parameter type, statrs bridge and MLE.

use serde::Serialize;
use statrs::distribution::{Continuous, ContinuousCDF, Gamma};
use statrs::function::gamma::ln_gamma;

use crate::error::DistributionError;
use crate::family::Family;
use crate::model::DistributionModel;
use crate::optimizer::{self, PENALTY};
use crate::standardize::Standardized;

/// Two-parameter Gamma in the shape/scale convention, supported on
/// `x > 0`. Used for strictly positive variables such as precipitation
/// totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GammaParams {
    shape: f64,
    scale: f64,
    #[serde(skip)]
    dist: Gamma,
}

impl GammaParams {
    /// `None` unless `shape` and `scale` are finite and positive.
    pub fn new(shape: f64, scale: f64) -> Option<Self> {
        if !(shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0) {
            return None;
        }
        // statrs parameterises Gamma by (shape, rate).
        let dist = Gamma::new(shape, 1.0 / scale).ok()?;
        Some(Self { shape, scale, dist })
    }

    /// Method-of-moments start: `shape = mean² / var`, `scale = var / mean`.
    pub fn from_moments(mean: f64, var: f64) -> Option<Self> {
        if !(mean > 0.0 && var > 0.0) {
            return None;
        }
        Self::new(mean.powi(2) / var, var / mean)
    }

    /// Shape `k`.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale `theta`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `k * theta`.
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }
}

impl DistributionModel for GammaParams {
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.dist.cdf(x) }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 { 1.0 } else { self.dist.sf(x) }
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            f64::NEG_INFINITY
        } else {
            self.dist.ln_pdf(x)
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        // statrs panics outside [0, 1]
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.dist.inverse_cdf(p)
    }
}

/// Negative log-likelihood over `theta = (ln shape, ln scale)`.
pub(crate) fn gamma_nll(theta: &[f64], data: &[f64]) -> f64 {
    let shape = theta[0].exp();
    let ln_scale = theta[1];
    let scale = ln_scale.exp();
    if !(shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0) {
        return PENALTY;
    }
    let n = data.len() as f64;
    let sum_x: f64 = data.iter().sum();
    let sum_ln_x: f64 = data.iter().map(|x| x.ln()).sum();
    n * ln_gamma(shape) + n * shape * ln_scale - (shape - 1.0) * sum_ln_x + sum_x / scale
}

/// Fits a Gamma distribution by maximum likelihood, starting from the
/// method-of-moments estimate. Values must be strictly positive.
pub(crate) fn fit_gamma(values: &[f64]) -> Result<GammaParams, DistributionError> {
    let std = Standardized::scale_only(Family::Gamma, values)?;
    let scaled = std.values();
    let start = GammaParams::from_moments(
        climattr_stats::mean(scaled),
        climattr_stats::variance(scaled),
    )
    .ok_or_else(|| std.no_start())?;
    let theta = optimizer::minimize(
        Family::Gamma,
        scaled,
        &[start.shape().ln(), start.scale().ln()],
        &[0.1, 0.1],
        gamma_nll,
    )?;
    let shape = theta[0].exp();
    let scale = std.unscale(theta[1].exp());
    GammaParams::new(shape, scale).ok_or_else(|| std.out_of_domain(&[shape, scale]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Gamma as GammaDist};

    #[test]
    fn params_accessors_and_domain() {
        let p = GammaParams::new(1.5, 8.0).unwrap();
        assert_eq!((p.shape(), p.scale()), (1.5, 8.0));
        assert_relative_eq!(p.mean(), 12.0);
        for (k, theta) in [(0.0, 1.0), (2.0, -0.5), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            assert!(GammaParams::new(k, theta).is_none(), "({k}, {theta})");
        }
    }

    #[test]
    fn moments_start() {
        // mean 12, var 96 -> k = 1.5, theta = 8
        let p = GammaParams::from_moments(12.0, 96.0).unwrap();
        assert_relative_eq!(p.shape(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(p.scale(), 8.0, epsilon = 1e-12);
        assert!(GammaParams::from_moments(-1.0, 4.0).is_none());
        assert!(GammaParams::from_moments(2.0, 0.0).is_none());
    }

    #[test]
    fn cdf_boundaries() {
        let p = GammaParams::new(2.0, 3.0).unwrap();
        assert_eq!(p.cdf(0.0), 0.0);
        assert_eq!(p.sf(-1.0), 1.0);
        assert_relative_eq!(p.cdf(1e6), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn quantile_round_trip() {
        let p = GammaParams::new(2.5, 4.0).unwrap();
        for &x in &[0.5, 1.0, 3.0, 10.0, 50.0] {
            assert_relative_eq!(p.quantile(p.cdf(x)), x, epsilon = 1e-6);
        }
    }

    #[test]
    fn mle_recovers_parameters() {
        let mut rng = StdRng::seed_from_u64(42);
        let dist = GammaDist::new(2.0, 3.0).unwrap();
        let data: Vec<f64> = (0..3000).map(|_| dist.sample(&mut rng)).collect();
        let fit = fit_gamma(&data).unwrap();
        assert_relative_eq!(fit.shape(), 2.0, epsilon = 0.2);
        assert_relative_eq!(fit.mean(), 6.0, epsilon = 0.3);
    }
}
