//! Error types for the climattr-distribution crate.

use crate::family::Family;

/// Error type for all fallible operations in the climattr-distribution crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DistributionError {
    /// Returned when a sample cannot be fitted at all: empty, non-finite,
    /// too short for the family, or outside the family's support.
    #[error("invalid sample of {n} observations: {reason}")]
    InvalidSample {
        /// Number of observations in the sample.
        n: usize,
        /// Description of the problem, including the offending value.
        reason: String,
    },

    /// Returned when maximum-likelihood estimation does not converge.
    #[error("{family} fit did not converge on {n} observations: {reason}")]
    FitConvergence {
        /// Family being fitted.
        family: Family,
        /// Number of observations in the sample.
        n: usize,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when an exceedance probability is 0, 1 or not a number.
    #[error(
        "degenerate exceedance probability {probability} at threshold {threshold} under the fitted {family} (must lie strictly in (0, 1))"
    )]
    DegenerateProbability {
        /// Family of the fitted distribution.
        family: Family,
        /// Threshold that was evaluated.
        threshold: f64,
        /// The probability that fell outside (0, 1).
        probability: f64,
    },

    /// Returned when a direction string is neither `ascending` nor `descending`.
    #[error("invalid direction {value:?} (must be \"ascending\" or \"descending\")")]
    InvalidDirection {
        /// The rejected input.
        value: String,
    },

    /// Returned when a family name is not recognised.
    #[error("unknown distribution family {name:?} (expected one of: normal, gumbel, gev, gamma)")]
    UnknownFamily {
        /// The rejected input.
        name: String,
    },

    /// Returned when explicit parameters are outside the family's domain.
    #[error("invalid {family} parameters: {reason}")]
    InvalidParams {
        /// Family the parameters were meant for.
        family: Family,
        /// Description of the problem.
        reason: String,
    },
}

impl DistributionError {
    /// Returns `true` for failures that only concern one particular fit
    /// (non-convergence or a degenerate probability) rather than malformed
    /// input.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            DistributionError::FitConvergence { .. } | DistributionError::DegenerateProbability { .. }
        )
    }
}
