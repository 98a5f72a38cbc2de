//! Parametric family identifiers and the fitting entry point.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DistributionError;
use crate::fitted::{DistributionFit, FittedDistribution};
use crate::{gamma, gev, gumbel, normal};

/// Closed set of supported parametric families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Normal (loc, scale).
    Normal,
    /// Gumbel for maxima (loc, scale).
    Gumbel,
    /// Generalized Extreme Value (loc, scale, shape).
    Gev,
    /// Gamma (shape, scale), support x > 0.
    Gamma,
}

impl Family {
    /// All families, in declaration order.
    pub const ALL: [Family; 4] = [Family::Normal, Family::Gumbel, Family::Gev, Family::Gamma];

    /// Lower-case name used in configuration files and output.
    pub fn name(self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::Gumbel => "gumbel",
            Family::Gev => "gev",
            Family::Gamma => "gamma",
        }
    }

    /// Number of free parameters.
    pub fn n_params(self) -> usize {
        match self {
            Family::Normal | Family::Gumbel | Family::Gamma => 2,
            Family::Gev => 3,
        }
    }

    /// Smallest sample for which the family is identifiable.
    pub fn min_sample_size(self) -> usize {
        (self.n_params() + 1).max(3)
    }

    /// Checks that `sample` can be handed to [`Family::fit`].
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidSample`] if the sample is empty,
    /// holds a non-finite value, is shorter than
    /// [`Family::min_sample_size`], or (Gamma) holds a value `<= 0`.
    pub fn validate_sample(self, sample: &[f64]) -> Result<(), DistributionError> {
        let n = sample.len();
        let invalid = |reason: String| DistributionError::InvalidSample { n, reason };

        if n == 0 {
            return Err(invalid("sample is empty".to_string()));
        }
        if let Some((i, v)) = sample.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("non-finite value {v} at index {i}")));
        }
        let min = self.min_sample_size();
        if n < min {
            return Err(invalid(format!(
                "{self} fit needs at least {min} observations"
            )));
        }
        if self == Family::Gamma
            && let Some((i, v)) = sample.iter().enumerate().find(|(_, v)| **v <= 0.0)
        {
            return Err(invalid(format!(
                "gamma support is x > 0, found {v} at index {i}"
            )));
        }
        Ok(())
    }

    /// Fits this family to `sample` by maximum likelihood.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidSample`] for unusable input and
    /// [`DistributionError::FitConvergence`] when the estimate cannot be
    /// found (zero-spread sample, optimizer failure).
    pub fn fit(self, sample: &[f64]) -> Result<DistributionFit, DistributionError> {
        self.validate_sample(sample)?;
        let model = match self {
            Family::Normal => FittedDistribution::Normal(normal::fit_normal(sample)?),
            Family::Gumbel => FittedDistribution::Gumbel(gumbel::fit_gumbel(sample)?),
            Family::Gev => FittedDistribution::Gev(gev::fit_gev(sample)?),
            Family::Gamma => FittedDistribution::Gamma(gamma::fit_gamma(sample)?),
        };
        Ok(DistributionFit::new(model, sample))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = DistributionError;

    /// Accepts the canonical names plus the scipy.stats spellings
    /// (`norm`, `gumbel_r`, `genextreme`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "norm" => Ok(Family::Normal),
            "gumbel" | "gumbel_r" => Ok(Family::Gumbel),
            "gev" | "genextreme" => Ok(Family::Gev),
            "gamma" => Ok(Family::Gamma),
            _ => Err(DistributionError::UnknownFamily {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("norm".parse::<Family>().unwrap(), Family::Normal);
        assert_eq!("GEV".parse::<Family>().unwrap(), Family::Gev);
        assert_eq!("genextreme".parse::<Family>().unwrap(), Family::Gev);
        assert_eq!("gumbel_r".parse::<Family>().unwrap(), Family::Gumbel);
        assert!(matches!(
            "weibull".parse::<Family>(),
            Err(DistributionError::UnknownFamily { .. })
        ));
    }

    #[test]
    fn min_sizes() {
        assert_eq!(Family::Normal.min_sample_size(), 3);
        assert_eq!(Family::Gev.min_sample_size(), 4);
    }

    #[test]
    fn validate_rejects_single_value() {
        for family in Family::ALL {
            let err = family.validate_sample(&[1.0]).unwrap_err();
            assert!(
                matches!(err, DistributionError::InvalidSample { n: 1, .. }),
                "{family}: {err}"
            );
        }
    }

    #[test]
    fn validate_rejects_non_finite() {
        let err = Family::Normal
            .validate_sample(&[1.0, f64::NAN, 2.0, 3.0])
            .unwrap_err();
        assert!(err.to_string().contains("index 1"), "{err}");
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(matches!(
            Family::Gumbel.validate_sample(&[]),
            Err(DistributionError::InvalidSample { n: 0, .. })
        ));
    }

    #[test]
    fn validate_gamma_support() {
        let err = Family::Gamma
            .validate_sample(&[1.0, 0.0, 2.0, 3.0])
            .unwrap_err();
        assert!(err.to_string().contains("gamma support"), "{err}");
        assert!(Family::Normal.validate_sample(&[1.0, 0.0, -2.0]).is_ok());
    }
}
