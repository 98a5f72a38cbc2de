//! Central values and confidence intervals from replicate populations.

use serde::Serialize;
use statrs::function::erf::erf_inv;

use crate::config::IntervalMethod;

/// A central value with lower and upper interval bounds,
/// `low <= central <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Central value (replicate median or mean, depending on the method).
    pub central: f64,
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl Estimate {
    /// Summarises a non-empty replicate population.
    pub(crate) fn from_replicates(
        values: &[f64],
        confidence_level: f64,
        method: IntervalMethod,
    ) -> Self {
        match method {
            IntervalMethod::Percentile => {
                let sorted = climattr_stats::sorted(values);
                let (lo_p, hi_p) = climattr_stats::two_sided_bounds(confidence_level);
                Self {
                    central: climattr_stats::median(&sorted),
                    low: climattr_stats::quantile_type7(&sorted, lo_p),
                    high: climattr_stats::quantile_type7(&sorted, hi_p),
                }
            }
            IntervalMethod::Normal => {
                let mean = climattr_stats::mean(values);
                let half_width = normal_z(confidence_level) * climattr_stats::sd(values);
                Self {
                    central: mean,
                    low: mean - half_width,
                    high: mean + half_width,
                }
            }
        }
    }

    /// Returns `true` if `x` lies inside `[low, high]`.
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    /// Interval width `high - low`.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Two-sided standard normal critical value: `Phi^-1(1 - (1 - cl) / 2)`.
fn normal_z(confidence_level: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf_inv(confidence_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn z_values() {
        assert_relative_eq!(normal_z(0.95), 1.959_963_985, epsilon = 1e-6);
        assert_relative_eq!(normal_z(0.90), 1.644_853_627, epsilon = 1e-6);
    }

    #[test]
    fn percentile_matches_numpy() {
        let v: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let e = Estimate::from_replicates(&v, 0.95, IntervalMethod::Percentile);
        // numpy.percentile(1..=10, [2.5, 50, 97.5]) = [1.225, 5.5, 9.775]
        assert_relative_eq!(e.low, 1.225, epsilon = 1e-12);
        assert_relative_eq!(e.central, 5.5, epsilon = 1e-12);
        assert_relative_eq!(e.high, 9.775, epsilon = 1e-12);
        assert!(e.contains(5.5));
        assert!(!e.contains(10.0));
    }

    #[test]
    fn normal_is_symmetric() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        let e = Estimate::from_replicates(&v, 0.95, IntervalMethod::Normal);
        assert_relative_eq!(e.central, 3.0);
        assert_relative_eq!(e.central - e.low, e.high - e.central, epsilon = 1e-12);
        assert_relative_eq!(e.width(), 2.0 * 1.959_963_985 * 2.5f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn single_replicate_collapses() {
        let e = Estimate::from_replicates(&[2.0], 0.9, IntervalMethod::Percentile);
        assert_eq!((e.low, e.central, e.high), (2.0, 2.0, 2.0));
    }
}
