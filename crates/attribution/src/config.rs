//! Configuration for attribution metrics and return-period curves.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::AttributionError;

/// Seed used when the caller does not supply one, so that repeated runs on
/// the same inputs agree.
pub const DEFAULT_SEED: u64 = 42;

/// How the replicate population is summarised into a central value and
/// interval bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalMethod {
    /// Median of the replicates, bounds at the two-sided empirical (type-7)
    /// percentiles. Robust to the skew typical of PR and FAR.
    #[default]
    Percentile,
    /// Mean of the replicates, bounds at `mean ± z * sd`.
    Normal,
}

impl IntervalMethod {
    /// Lower-case name used in configuration files and output.
    pub fn name(self) -> &'static str {
        match self {
            IntervalMethod::Percentile => "percentile",
            IntervalMethod::Normal => "normal",
        }
    }
}

impl fmt::Display for IntervalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntervalMethod {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentile" | "empirical" => Ok(IntervalMethod::Percentile),
            "normal" => Ok(IntervalMethod::Normal),
            _ => Err(AttributionError::InvalidConfig {
                reason: format!("unknown interval method {s:?} (expected percentile or normal)"),
            }),
        }
    }
}

fn check_confidence_level(confidence_level: f64) -> Result<(), AttributionError> {
    if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(AttributionError::InvalidConfig {
            reason: format!("confidence_level must be in (0, 1), got {confidence_level}"),
        });
    }
    Ok(())
}

fn check_replicate_count(replicate_count: usize) -> Result<(), AttributionError> {
    if replicate_count < 1 {
        return Err(AttributionError::InvalidConfig {
            reason: "replicate_count must be >= 1".to_string(),
        });
    }
    Ok(())
}

/// Configuration for [`crate::attribution_metrics`].
///
/// # Example
///
/// ```
/// use climattr_attribution::{AttributionConfig, IntervalMethod};
///
/// let config = AttributionConfig::new()
///     .with_replicate_count(500)
///     .with_seed(7)
///     .with_interval_method(IntervalMethod::Percentile);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AttributionConfig {
    replicate_count: usize,
    seed: u64,
    confidence_level: f64,
    max_excluded_fraction: f64,
    interval_method: IntervalMethod,
    parallel: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl AttributionConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `replicate_count = 1000`, `seed = 42`,
    /// `confidence_level = 0.95`, `max_excluded_fraction = 0.5`,
    /// `interval_method = Percentile`, `parallel = true`, no cancellation.
    pub fn new() -> Self {
        Self {
            replicate_count: 1000,
            seed: DEFAULT_SEED,
            confidence_level: 0.95,
            max_excluded_fraction: 0.5,
            interval_method: IntervalMethod::Percentile,
            parallel: true,
            cancel: None,
        }
    }

    // --- Builder methods ---

    /// Sets the number of bootstrap replicates.
    pub fn with_replicate_count(mut self, n: usize) -> Self {
        self.replicate_count = n;
        self
    }

    /// Sets the resampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the two-sided confidence level.
    pub fn with_confidence_level(mut self, cl: f64) -> Self {
        self.confidence_level = cl;
        self
    }

    /// Sets the largest tolerated fraction of excluded replicates.
    pub fn with_max_excluded_fraction(mut self, f: f64) -> Self {
        self.max_excluded_fraction = f;
        self
    }

    /// Sets how intervals are derived from the replicates.
    pub fn with_interval_method(mut self, m: IntervalMethod) -> Self {
        self.interval_method = m;
        self
    }

    /// Sets whether replicates are evaluated on the rayon thread pool.
    pub fn with_parallel(mut self, b: bool) -> Self {
        self.parallel = b;
        self
    }

    /// Installs a cancellation flag. Once it is set, replicates that have not
    /// started yet are skipped and counted as cancelled.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    // --- Accessors ---

    /// Returns the number of bootstrap replicates.
    pub fn replicate_count(&self) -> usize {
        self.replicate_count
    }

    /// Returns the resampling seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the confidence level.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the largest tolerated fraction of excluded replicates.
    pub fn max_excluded_fraction(&self) -> f64 {
        self.max_excluded_fraction
    }

    /// Returns the interval method.
    pub fn interval_method(&self) -> IntervalMethod {
        self.interval_method
    }

    /// Returns whether replicates run in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns `true` if the cancellation flag is installed and set.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Validates this configuration.
    ///
    /// Checks that `replicate_count >= 1`, `confidence_level` lies in the
    /// open interval (0, 1) and `max_excluded_fraction` in [0, 1].
    pub fn validate(&self) -> Result<(), AttributionError> {
        check_replicate_count(self.replicate_count)?;
        check_confidence_level(self.confidence_level)?;
        if !self.max_excluded_fraction.is_finite()
            || !(0.0..=1.0).contains(&self.max_excluded_fraction)
        {
            return Err(AttributionError::InvalidConfig {
                reason: format!(
                    "max_excluded_fraction must be in [0, 1], got {}",
                    self.max_excluded_fraction
                ),
            });
        }
        Ok(())
    }
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for [`crate::return_period_curve`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurveConfig {
    replicate_count: usize,
    seed: u64,
    confidence_level: f64,
    return_periods: Vec<f64>,
}

impl CurveConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `replicate_count = 1000`, `seed = 42`,
    /// `confidence_level = 0.95`, `return_periods = [2, 5, 10, 20, 50, 100]`.
    pub fn new() -> Self {
        Self {
            replicate_count: 1000,
            seed: DEFAULT_SEED,
            confidence_level: 0.95,
            return_periods: vec![2.0, 5.0, 10.0, 20.0, 50.0, 100.0],
        }
    }

    /// Sets the number of bootstrap replicates.
    pub fn with_replicate_count(mut self, n: usize) -> Self {
        self.replicate_count = n;
        self
    }

    /// Sets the resampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the two-sided confidence level of the bands.
    pub fn with_confidence_level(mut self, cl: f64) -> Self {
        self.confidence_level = cl;
        self
    }

    /// Sets the return periods whose return levels are reported.
    pub fn with_return_periods(mut self, periods: Vec<f64>) -> Self {
        self.return_periods = periods;
        self
    }

    /// Returns the number of bootstrap replicates.
    pub fn replicate_count(&self) -> usize {
        self.replicate_count
    }

    /// Returns the resampling seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the confidence level.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the return periods.
    pub fn return_periods(&self) -> &[f64] {
        &self.return_periods
    }

    /// Validates this configuration.
    ///
    /// Besides the replicate count and confidence level, every return period
    /// must be finite and greater than 1.
    pub fn validate(&self) -> Result<(), AttributionError> {
        check_replicate_count(self.replicate_count)?;
        check_confidence_level(self.confidence_level)?;
        if let Some(&t) = self
            .return_periods
            .iter()
            .find(|t| !t.is_finite() || **t <= 1.0)
        {
            return Err(AttributionError::InvalidConfig {
                reason: format!("return periods must be finite and > 1, got {t}"),
            });
        }
        Ok(())
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = AttributionConfig::default();
        assert_eq!(c.replicate_count(), 1000);
        assert_eq!(c.seed(), DEFAULT_SEED);
        assert_eq!(c.confidence_level(), 0.95);
        assert_eq!(c.max_excluded_fraction(), 0.5);
        assert_eq!(c.interval_method(), IntervalMethod::Percentile);
        assert!(c.parallel());
        assert!(!c.is_cancelled());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn invalid_values() {
        for config in [
            AttributionConfig::new().with_replicate_count(0),
            AttributionConfig::new().with_confidence_level(1.0),
            AttributionConfig::new().with_confidence_level(0.0),
            AttributionConfig::new().with_confidence_level(f64::NAN),
            AttributionConfig::new().with_max_excluded_fraction(1.5),
            AttributionConfig::new().with_max_excluded_fraction(-0.1),
        ] {
            assert!(
                matches!(config.validate(), Err(AttributionError::InvalidConfig { .. })),
                "{config:?}"
            );
        }
    }

    #[test]
    fn cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let c = AttributionConfig::new().with_cancel_flag(Arc::clone(&flag));
        assert!(!c.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(c.is_cancelled());
    }

    #[test]
    fn interval_method_parse() {
        assert_eq!(
            "Empirical".parse::<IntervalMethod>().unwrap(),
            IntervalMethod::Percentile
        );
        assert_eq!("normal".parse::<IntervalMethod>().unwrap(), IntervalMethod::Normal);
        assert!("bca".parse::<IntervalMethod>().is_err());
    }

    #[test]
    fn curve_config_validation() {
        assert!(CurveConfig::default().validate().is_ok());
        assert!(
            CurveConfig::new()
                .with_return_periods(vec![10.0, 1.0])
                .validate()
                .is_err()
        );
        assert!(CurveConfig::new().with_replicate_count(0).validate().is_err());
    }
}
