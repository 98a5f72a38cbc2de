//! Scaling methods and their inverses.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ScalingError;

/// How a series is expressed relative to its baseline mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMethod {
    /// Anomaly: `x - mean`. Suited to temperature-like variables.
    Additive,
    /// Ratio: `x / mean`. Suited to non-negative variables such as
    /// precipitation.
    Multiplicative,
}

impl ScalingMethod {
    /// Lower-case name used in configuration files and output.
    pub fn name(self) -> &'static str {
        match self {
            ScalingMethod::Additive => "additive",
            ScalingMethod::Multiplicative => "multiplicative",
        }
    }

    /// Applies the method to one value.
    pub fn apply(self, value: f64, baseline_mean: f64) -> f64 {
        match self {
            ScalingMethod::Additive => value - baseline_mean,
            ScalingMethod::Multiplicative => value / baseline_mean,
        }
    }

    /// Reverses [`ScalingMethod::apply`] with the same baseline mean.
    pub fn invert(self, value: f64, baseline_mean: f64) -> f64 {
        match self {
            ScalingMethod::Additive => value + baseline_mean,
            ScalingMethod::Multiplicative => value * baseline_mean,
        }
    }

    /// Checks that the method can be applied to `series` with
    /// `baseline_mean`.
    ///
    /// # Errors
    ///
    /// Multiplicative scaling needs a strictly positive baseline mean and a
    /// series without negative values; otherwise
    /// [`ScalingError::InvalidScalingMethod`].
    pub fn check_applicable(self, series: &[f64], baseline_mean: f64) -> Result<(), ScalingError> {
        if self == ScalingMethod::Additive {
            return Ok(());
        }
        let invalid = |reason: String| ScalingError::InvalidScalingMethod {
            method: self.name().to_string(),
            reason,
        };
        if baseline_mean <= 0.0 {
            return Err(invalid(format!(
                "baseline mean {baseline_mean} must be positive"
            )));
        }
        if let Some((i, v)) = series.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(invalid(format!("negative value {v} at index {i}")));
        }
        Ok(())
    }
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingMethod {
    type Err = ScalingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "additive" => Ok(ScalingMethod::Additive),
            "mult" | "multiply" | "multiplicative" | "divide" => Ok(ScalingMethod::Multiplicative),
            _ => Err(ScalingError::InvalidScalingMethod {
                method: s.to_string(),
                reason: "expected one of: add, additive, mult, multiply, multiplicative, divide"
                    .to_string(),
            }),
        }
    }
}
