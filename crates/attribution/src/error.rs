//! Error types for the climattr-attribution crate.

use climattr_distribution::{DistributionError, Family};

/// Error type for all fallible operations in the climattr-attribution crate.
///
/// Errors about one of the input samples carry the sample's label so the
/// caller can tell the factual and counterfactual inputs apart.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttributionError {
    /// Returned when a sample is unusable for the requested family.
    #[error("invalid {label} sample of {n} observations: {reason}")]
    InvalidSample {
        /// Label of the sample (e.g. "factual").
        label: String,
        /// Number of observations.
        n: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the fit of an unmodified sample does not converge.
    #[error("{family} fit of the {label} sample did not converge: {reason}")]
    FitConvergence {
        /// Label of the sample.
        label: String,
        /// Family being fitted.
        family: Family,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when the exceedance probability of an unmodified sample is
    /// 0 or 1.
    #[error(
        "degenerate exceedance probability {probability} for the {label} sample at threshold {threshold} ({family}); move the threshold inside the data range"
    )]
    DegenerateProbability {
        /// Label of the sample.
        label: String,
        /// Family of the fit.
        family: Family,
        /// Threshold that was evaluated.
        threshold: f64,
        /// The probability that fell outside (0, 1).
        probability: f64,
    },

    /// Returned when a direction string is not recognised.
    #[error("invalid direction {value:?} (must be \"ascending\" or \"descending\")")]
    InvalidDirection {
        /// The rejected input.
        value: String,
    },

    /// Returned when the threshold is NaN or infinite.
    #[error("threshold must be finite, got {value}")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },

    /// Returned when configuration parameters are invalid.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Description of the invalid configuration.
        reason: String,
    },

    /// Returned when too many bootstrap replicates were excluded for the
    /// interval to be meaningful.
    #[error(
        "insufficient bootstrap replicates: {excluded} of {attempted} excluded ({:.1}% > {:.1}% tolerated); increase the replicate count or inspect the samples for outliers and ties",
        .fraction * 100.0,
        .tolerance * 100.0
    )]
    InsufficientReplicates {
        /// Replicates whose fit or probability failed.
        excluded: usize,
        /// Replicates evaluated (requested minus cancelled).
        attempted: usize,
        /// `excluded / attempted`.
        fraction: f64,
        /// Configured maximum excluded fraction.
        tolerance: f64,
    },

    /// Any other error from the distribution fitter.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

impl AttributionError {
    /// Attaches `label` to a fitter error raised for one of the input samples.
    pub(crate) fn for_sample(label: &str, err: DistributionError) -> Self {
        match err {
            DistributionError::InvalidSample { n, reason } => AttributionError::InvalidSample {
                label: label.to_string(),
                n,
                reason,
            },
            DistributionError::FitConvergence { family, reason, .. } => {
                AttributionError::FitConvergence {
                    label: label.to_string(),
                    family,
                    reason,
                }
            }
            DistributionError::DegenerateProbability {
                family,
                threshold,
                probability,
            } => AttributionError::DegenerateProbability {
                label: label.to_string(),
                family,
                threshold,
                probability,
            },
            DistributionError::InvalidDirection { value } => {
                AttributionError::InvalidDirection { value }
            }
            other => AttributionError::Distribution(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_sample() {
        let e = AttributionError::InvalidSample {
            label: "factual".into(),
            n: 1,
            reason: "normal fit needs at least 3 observations".into(),
        };
        assert_eq!(
            e.to_string(),
            "invalid factual sample of 1 observations: normal fit needs at least 3 observations"
        );
    }

    #[test]
    fn display_insufficient_replicates() {
        let e = AttributionError::InsufficientReplicates {
            excluded: 60,
            attempted: 100,
            fraction: 0.6,
            tolerance: 0.5,
        };
        let msg = e.to_string();
        assert!(msg.starts_with(
            "insufficient bootstrap replicates: 60 of 100 excluded (60.0% > 50.0% tolerated)"
        ));
        assert!(msg.contains("increase the replicate count"));
    }

    #[test]
    fn display_invalid_threshold() {
        let e = AttributionError::InvalidThreshold { value: f64::NAN };
        assert_eq!(e.to_string(), "threshold must be finite, got NaN");
    }

    #[test]
    fn for_sample_labels_errors() {
        let e = AttributionError::for_sample(
            "counterfactual",
            DistributionError::FitConvergence {
                family: Family::Gev,
                n: 30,
                reason: "iteration cap of 5000 reached".into(),
            },
        );
        assert!(matches!(
            &e,
            AttributionError::FitConvergence { label, family: Family::Gev, .. } if label == "counterfactual"
        ));
        assert_eq!(
            e.to_string(),
            "gev fit of the counterfactual sample did not converge: iteration cap of 5000 reached"
        );
    }

    #[test]
    fn distribution_error_is_transparent() {
        let inner = DistributionError::UnknownFamily {
            name: "weibull".into(),
        };
        let expected = inner.to_string();
        let e = AttributionError::from(inner);
        assert_eq!(e.to_string(), expected);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<AttributionError>();
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<AttributionError>();
    }
}
