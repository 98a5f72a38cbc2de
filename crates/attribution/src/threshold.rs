//! Threshold validation and exceedance evaluation.

use climattr_distribution::{Direction, DistributionError, DistributionFit};
use serde::Serialize;

use crate::error::AttributionError;

/// A finite event threshold with the direction that counts as extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    value: f64,
    direction: Direction,
}

impl Threshold {
    /// Creates a threshold.
    ///
    /// # Errors
    ///
    /// [`AttributionError::InvalidThreshold`] if `value` is NaN or infinite.
    pub fn new(value: f64, direction: Direction) -> Result<Self, AttributionError> {
        if !value.is_finite() {
            return Err(AttributionError::InvalidThreshold { value });
        }
        Ok(Self { value, direction })
    }

    /// Creates a threshold from a direction string (`ascending` or
    /// `descending`, case-insensitive).
    ///
    /// # Errors
    ///
    /// [`AttributionError::InvalidDirection`] for any other direction text,
    /// then the same checks as [`Threshold::new`].
    pub fn parse(value: f64, direction: &str) -> Result<Self, AttributionError> {
        let direction: Direction = direction
            .parse()
            .map_err(|e| AttributionError::for_sample("threshold", e))?;
        Self::new(value, direction)
    }

    /// Threshold value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Exceedance direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Evaluates exceedance probabilities and return periods of one threshold
/// under fitted distributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEvaluator {
    threshold: Threshold,
}

impl ThresholdEvaluator {
    /// Creates an evaluator for `threshold`.
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    /// The threshold being evaluated.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Probability of the event under `fit`, strictly inside (0, 1).
    pub fn evaluate(&self, fit: &DistributionFit) -> Result<f64, DistributionError> {
        fit.exceedance_probability(self.threshold.value, self.threshold.direction)
    }

    /// Return period of the event under `fit`: `1 / probability`.
    pub fn return_period(&self, fit: &DistributionFit) -> Result<f64, DistributionError> {
        self.evaluate(fit).map(|p| 1.0 / p)
    }
}
