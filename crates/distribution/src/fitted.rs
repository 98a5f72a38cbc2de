//! Fitted distributions and exceedance probabilities.

use serde::Serialize;

use crate::direction::Direction;
use crate::error::DistributionError;
use crate::family::Family;
use crate::gamma::GammaParams;
use crate::gev::GevParams;
use crate::gumbel::GumbelParams;
use crate::model::DistributionModel;
use crate::normal::NormalParams;

/// A family together with its parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum FittedDistribution {
    /// Normal parameters.
    Normal(NormalParams),
    /// Gumbel parameters.
    Gumbel(GumbelParams),
    /// GEV parameters.
    Gev(GevParams),
    /// Gamma parameters.
    Gamma(GammaParams),
}

impl FittedDistribution {
    /// Family of this distribution.
    pub fn family(&self) -> Family {
        match self {
            FittedDistribution::Normal(_) => Family::Normal,
            FittedDistribution::Gumbel(_) => Family::Gumbel,
            FittedDistribution::Gev(_) => Family::Gev,
            FittedDistribution::Gamma(_) => Family::Gamma,
        }
    }

    /// Parameter vector in the family's documented order:
    /// `(loc, scale)`, `(loc, scale, shape)` for GEV, `(shape, scale)` for Gamma.
    pub fn params(&self) -> Vec<f64> {
        match self {
            FittedDistribution::Normal(p) => vec![p.loc(), p.scale()],
            FittedDistribution::Gumbel(p) => vec![p.loc(), p.scale()],
            FittedDistribution::Gev(p) => vec![p.loc(), p.scale(), p.shape()],
            FittedDistribution::Gamma(p) => vec![p.shape(), p.scale()],
        }
    }

    /// Builds a distribution from an explicit parameter vector (same order as
    /// [`FittedDistribution::params`]).
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParams`] for a wrong parameter
    /// count or values outside the family's domain.
    pub fn from_params(family: Family, params: &[f64]) -> Result<Self, DistributionError> {
        if params.len() != family.n_params() {
            return Err(DistributionError::InvalidParams {
                family,
                reason: format!(
                    "expected {} parameters, got {}",
                    family.n_params(),
                    params.len()
                ),
            });
        }
        let model = match family {
            Family::Normal => NormalParams::new(params[0], params[1]).map(FittedDistribution::Normal),
            Family::Gumbel => GumbelParams::new(params[0], params[1]).map(FittedDistribution::Gumbel),
            Family::Gev => {
                GevParams::new(params[0], params[1], params[2]).map(FittedDistribution::Gev)
            }
            Family::Gamma => GammaParams::new(params[0], params[1]).map(FittedDistribution::Gamma),
        };
        model.ok_or_else(|| DistributionError::InvalidParams {
            family,
            reason: format!("{params:?} outside the valid domain"),
        })
    }

    fn model(&self) -> &dyn DistributionModel {
        match self {
            FittedDistribution::Normal(p) => p,
            FittedDistribution::Gumbel(p) => p,
            FittedDistribution::Gev(p) => p,
            FittedDistribution::Gamma(p) => p,
        }
    }

    /// Probability of the tail selected by `direction` at `threshold`,
    /// required to lie strictly inside (0, 1).
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::DegenerateProbability`] when the
    /// probability is 0, 1 or NaN (threshold outside the effective support).
    pub fn exceedance_probability(
        &self,
        threshold: f64,
        direction: Direction,
    ) -> Result<f64, DistributionError> {
        let probability = direction.tail_probability(self.model(), threshold);
        if probability > 0.0 && probability < 1.0 {
            Ok(probability)
        } else {
            Err(DistributionError::DegenerateProbability {
                family: self.family(),
                threshold,
                probability,
            })
        }
    }

    /// Sum of log-densities over `sample`.
    pub fn log_likelihood(&self, sample: &[f64]) -> f64 {
        sample.iter().map(|&x| self.ln_pdf(x)).sum()
    }
}

impl DistributionModel for FittedDistribution {
    fn cdf(&self, x: f64) -> f64 {
        self.model().cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.model().sf(x)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        self.model().ln_pdf(x)
    }

    fn quantile(&self, p: f64) -> f64 {
        self.model().quantile(p)
    }
}

/// Result of [`Family::fit`]: the fitted distribution plus the size and
/// log-likelihood of the sample it was fit from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionFit {
    model: FittedDistribution,
    n_obs: usize,
    log_likelihood: f64,
}

impl DistributionFit {
    pub(crate) fn new(model: FittedDistribution, sample: &[f64]) -> Self {
        Self {
            model,
            n_obs: sample.len(),
            log_likelihood: model.log_likelihood(sample),
        }
    }

    /// The fitted distribution.
    pub fn model(&self) -> &FittedDistribution {
        &self.model
    }

    /// Family of the fit.
    pub fn family(&self) -> Family {
        self.model.family()
    }

    /// Fitted parameter vector.
    pub fn params(&self) -> Vec<f64> {
        self.model.params()
    }

    /// Number of observations the fit was computed from.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike Information Criterion: `2k - 2 ln L`.
    pub fn aic(&self) -> f64 {
        2.0 * self.family().n_params() as f64 - 2.0 * self.log_likelihood
    }

    /// See [`FittedDistribution::exceedance_probability`].
    pub fn exceedance_probability(
        &self,
        threshold: f64,
        direction: Direction,
    ) -> Result<f64, DistributionError> {
        self.model.exceedance_probability(threshold, direction)
    }
}

/// Fits `family` to `sample`; free-function form of [`Family::fit`].
pub fn fit(sample: &[f64], family: Family) -> Result<DistributionFit, DistributionError> {
    family.fit(sample)
}

/// Exceedance probability of `threshold` under `fit` in `direction`.
pub fn exceedance_probability(
    fit: &DistributionFit,
    threshold: f64,
    direction: Direction,
) -> Result<f64, DistributionError> {
    fit.exceedance_probability(threshold, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_params_round_trip() {
        for (family, params) in [
            (Family::Normal, vec![1.0, 2.0]),
            (Family::Gumbel, vec![1.0, 2.0]),
            (Family::Gev, vec![1.0, 2.0, 0.1]),
            (Family::Gamma, vec![2.0, 3.0]),
        ] {
            let d = FittedDistribution::from_params(family, &params).unwrap();
            assert_eq!(d.family(), family);
            assert_eq!(d.params(), params);
        }
    }

    #[test]
    fn from_params_rejects_bad_input() {
        assert!(matches!(
            FittedDistribution::from_params(Family::Gev, &[1.0, 2.0]),
            Err(DistributionError::InvalidParams { .. })
        ));
        assert!(matches!(
            FittedDistribution::from_params(Family::Normal, &[1.0, -2.0]),
            Err(DistributionError::InvalidParams { .. })
        ));
    }

    #[test]
    fn exceedance_directions() {
        let d = FittedDistribution::from_params(Family::Normal, &[0.0, 1.0]).unwrap();
        let up = d.exceedance_probability(1.0, Direction::Ascending).unwrap();
        let down = d.exceedance_probability(1.0, Direction::Descending).unwrap();
        assert_relative_eq!(up + down, 1.0, epsilon = 1e-12);
        assert!(up < 0.5);
    }

    #[test]
    fn exceedance_degenerate() {
        let d = FittedDistribution::from_params(Family::Gamma, &[2.0, 1.0]).unwrap();
        // Nothing lies below zero under a Gamma.
        let err = d.exceedance_probability(-1.0, Direction::Descending).unwrap_err();
        assert!(matches!(
            err,
            DistributionError::DegenerateProbability { probability, .. } if probability == 0.0
        ));
        let n = FittedDistribution::from_params(Family::Normal, &[0.0, 1.0]).unwrap();
        assert!(n.exceedance_probability(60.0, Direction::Ascending).is_err());
    }

    #[test]
    fn fit_metadata() {
        let d = FittedDistribution::from_params(Family::Gev, &[1.0, 2.0, 0.5]).unwrap();
        let fit = DistributionFit::new(d, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(fit.n_obs(), 4);
        assert!(fit.aic().is_finite());
    }
}
