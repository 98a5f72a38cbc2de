//! Generalized Extreme Value parameters and MLE.
//!
//! Shape convention: `xi > 0` is the heavy-tailed (Fréchet) case, `xi < 0`
//! has a finite upper endpoint (reversed Weibull), `xi = 0` is Gumbel.
//! scipy's `genextreme` uses `c = -xi`.

use serde::Serialize;

use crate::error::DistributionError;
use crate::family::Family;
use crate::gumbel::GumbelParams;
use crate::model::DistributionModel;
use crate::optimizer::{self, PENALTY};
use crate::standardize::Standardized;

/// Shapes closer to zero than this use the Gumbel limit.
const GUMBEL_LIMIT: f64 = 1e-9;

/// Admissible shape range for maximum likelihood. The likelihood is
/// unbounded for `xi <= -1`.
const MAX_ABS_SHAPE: f64 = 1.0;

/// Validated GEV parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GevParams {
    loc: f64,
    scale: f64,
    shape: f64,
}

impl GevParams {
    /// Creates parameters after checking that all three are finite and
    /// `scale` is strictly positive.
    pub fn new(loc: f64, scale: f64, shape: f64) -> Option<Self> {
        if loc.is_finite() && scale.is_finite() && scale > 0.0 && shape.is_finite() {
            Some(Self { loc, scale, shape })
        } else {
            None
        }
    }

    /// Location.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shape (`xi`).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    fn is_gumbel(&self) -> bool {
        self.shape.abs() < GUMBEL_LIMIT
    }

    /// `t(x) = 1 + xi * (x - loc) / scale`; the support is `t > 0`.
    fn t(&self, x: f64) -> f64 {
        1.0 + self.shape * (x - self.loc) / self.scale
    }

    /// `-ln F(x)`, i.e. `t^(-1/xi)` (or `exp(-z)` in the Gumbel limit).
    /// `None` outside the support.
    fn neg_ln_cdf(&self, x: f64) -> Option<f64> {
        if self.is_gumbel() {
            return Some((-(x - self.loc) / self.scale).exp());
        }
        let t = self.t(x);
        if t <= 0.0 {
            None
        } else {
            Some(t.powf(-1.0 / self.shape))
        }
    }
}

impl DistributionModel for GevParams {
    fn cdf(&self, x: f64) -> f64 {
        match self.neg_ln_cdf(x) {
            Some(u) => (-u).exp(),
            // Below the lower endpoint (xi > 0) or above the upper one (xi < 0).
            None if self.shape > 0.0 => 0.0,
            None => 1.0,
        }
    }

    fn sf(&self, x: f64) -> f64 {
        match self.neg_ln_cdf(x) {
            Some(u) => -(-u).exp_m1(),
            None if self.shape > 0.0 => 1.0,
            None => 0.0,
        }
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if self.is_gumbel() {
            let z = (x - self.loc) / self.scale;
            return -self.scale.ln() - z - (-z).exp();
        }
        let t = self.t(x);
        if t <= 0.0 {
            return f64::NEG_INFINITY;
        }
        -self.scale.ln() - (1.0 + 1.0 / self.shape) * t.ln() - t.powf(-1.0 / self.shape)
    }

    fn quantile(&self, p: f64) -> f64 {
        let y = -p.ln();
        if self.is_gumbel() {
            self.loc - self.scale * y.ln()
        } else {
            self.loc + self.scale / self.shape * (y.powf(-self.shape) - 1.0)
        }
    }
}

/// Negative log-likelihood over `theta = (loc, ln scale, xi)`.
pub(crate) fn gev_nll(theta: &[f64], data: &[f64]) -> f64 {
    let (loc, ln_scale, shape) = (theta[0], theta[1], theta[2]);
    if shape.abs() >= MAX_ABS_SHAPE {
        return PENALTY;
    }
    let Some(params) = GevParams::new(loc, ln_scale.exp(), shape) else {
        return PENALTY;
    };
    let mut nll = 0.0;
    for &x in data {
        let lp = params.ln_pdf(x);
        if !lp.is_finite() {
            return PENALTY;
        }
        nll -= lp;
    }
    nll
}

/// Fits a GEV distribution by maximum likelihood, starting from the Gumbel
/// method-of-moments solution with `xi = 0`.
pub(crate) fn fit_gev(values: &[f64]) -> Result<GevParams, DistributionError> {
    let std = Standardized::location_scale(Family::Gev, values)?;
    let start = GumbelParams::from_moments(0.0, 1.0).ok_or_else(|| std.no_start())?;
    let theta = optimizer::minimize(
        Family::Gev,
        std.values(),
        &[start.loc(), start.scale().ln(), 0.0],
        &[0.1, 0.1, 0.1],
        gev_nll,
    )?;
    let loc = std.unshift(theta[0]);
    let scale = std.unscale(theta[1].exp());
    let shape = theta[2];
    GevParams::new(loc, scale, shape).ok_or_else(|| std.out_of_domain(&[loc, scale, shape]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample(params: &GevParams, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let u: f64 = rng.random_range(1e-12..1.0);
                params.quantile(u)
            })
            .collect()
    }

    #[test]
    fn zero_shape_matches_gumbel() {
        let gev = GevParams::new(5.0, 2.0, 0.0).unwrap();
        let gum = GumbelParams::new(5.0, 2.0).unwrap();
        for &x in &[0.0, 5.0, 9.0, 15.0] {
            assert_relative_eq!(gev.cdf(x), gum.cdf(x), epsilon = 1e-14);
            assert_relative_eq!(gev.ln_pdf(x), gum.ln_pdf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn small_shape_is_continuous() {
        let a = GevParams::new(0.0, 1.0, 1e-6).unwrap();
        let b = GevParams::new(0.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(a.sf(3.0), b.sf(3.0), epsilon = 1e-5);
    }

    #[test]
    fn support_endpoints() {
        // xi > 0: lower endpoint at loc - scale / xi = -10.
        let heavy = GevParams::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(heavy.cdf(-11.0), 0.0);
        assert_eq!(heavy.sf(-11.0), 1.0);
        assert_eq!(heavy.ln_pdf(-11.0), f64::NEG_INFINITY);
        // xi < 0: upper endpoint at loc + scale / |xi| = 5.
        let bounded = GevParams::new(0.0, 1.0, -0.2).unwrap();
        assert_eq!(bounded.cdf(6.0), 1.0);
        assert_eq!(bounded.sf(6.0), 0.0);
    }

    #[test]
    fn quantile_inverts_cdf() {
        let p = GevParams::new(20.0, 2.0, 0.15).unwrap();
        for &q in &[0.05, 0.5, 0.9, 0.999] {
            assert_relative_eq!(p.cdf(p.quantile(q)), q, epsilon = 1e-10);
        }
    }

    #[test]
    fn mle_recovers_parameters() {
        let truth = GevParams::new(20.0, 2.0, 0.1).unwrap();
        let data = sample(&truth, 3000, 2024);
        let fit = fit_gev(&data).unwrap();
        assert_relative_eq!(fit.loc(), 20.0, epsilon = 0.2);
        assert_relative_eq!(fit.scale(), 2.0, epsilon = 0.2);
        assert_relative_eq!(fit.shape(), 0.1, epsilon = 0.08);
    }

    #[test]
    fn mle_bounded_tail() {
        let truth = GevParams::new(0.0, 1.0, -0.25).unwrap();
        let data = sample(&truth, 3000, 99);
        let fit = fit_gev(&data).unwrap();
        assert!(fit.shape() < 0.0, "shape = {}", fit.shape());
    }

    #[test]
    fn nll_penalises_out_of_range_shape() {
        assert_eq!(gev_nll(&[0.0, 0.0, 1.5], &[0.1, 0.2]), PENALTY);
        assert_eq!(gev_nll(&[0.0, 0.0, -1.0], &[0.1, 0.2]), PENALTY);
    }
}
