//! Result types for attribution metrics.

use climattr_distribution::{Direction, Family, FittedDistribution};
use serde::Serialize;

use crate::config::IntervalMethod;
use crate::estimate::Estimate;
use crate::threshold::Threshold;

/// Metrics derived from one pair of exceedance probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointEstimate {
    /// Exceedance probability under the factual fit.
    pub p_factual: f64,
    /// Exceedance probability under the counterfactual fit.
    pub p_counterfactual: f64,
    /// Probability ratio `p_factual / p_counterfactual`.
    pub pr: f64,
    /// Fraction of attributable risk `1 - 1 / pr`.
    pub far: f64,
    /// Factual return period `1 / p_factual`.
    pub rp_factual: f64,
    /// Counterfactual return period `1 / p_counterfactual`.
    pub rp_counterfactual: f64,
}

impl PointEstimate {
    /// Derives all metrics from two probabilities in (0, 1).
    pub fn from_probabilities(p_factual: f64, p_counterfactual: f64) -> Self {
        let pr = p_factual / p_counterfactual;
        Self {
            p_factual,
            p_counterfactual,
            pr,
            far: 1.0 - 1.0 / pr,
            rp_factual: 1.0 / p_factual,
            rp_counterfactual: 1.0 / p_counterfactual,
        }
    }
}

/// Bookkeeping of the bootstrap loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplicateCounts {
    /// Replicates requested in the configuration.
    pub requested: usize,
    /// Replicates that entered the interval estimates.
    pub used: usize,
    /// Replicates dropped after a fit or probability failure.
    pub excluded: usize,
    /// Replicates skipped because the run was cancelled.
    pub cancelled: usize,
}

impl ReplicateCounts {
    /// Replicates that were evaluated: `requested - cancelled`.
    pub fn attempted(&self) -> usize {
        self.requested - self.cancelled
    }
}

/// The output of [`crate::attribution_metrics`].
///
/// Holds interval estimates for PR, FAR and both return periods, the point
/// estimates from the unmodified samples, the fitted distributions and the
/// settings that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionMetrics {
    pr: Estimate,
    far: Estimate,
    rp_factual: Estimate,
    rp_counterfactual: Estimate,
    point: PointEstimate,
    threshold: Threshold,
    family: Family,
    factual_fit: FittedDistribution,
    counterfactual_fit: FittedDistribution,
    confidence_level: f64,
    interval_method: IntervalMethod,
    seed: u64,
    replicates: ReplicateCounts,
}

/// Interval estimates of the four metrics, in the order PR, FAR, RP factual,
/// RP counterfactual.
pub(crate) type MetricIntervals = [Estimate; 4];

/// The fits of the unmodified factual and counterfactual samples.
pub(crate) type FitPair = (FittedDistribution, FittedDistribution);

impl AttributionMetrics {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        intervals: MetricIntervals,
        point: PointEstimate,
        threshold: Threshold,
        family: Family,
        fits: FitPair,
        confidence_level: f64,
        interval_method: IntervalMethod,
        seed: u64,
        replicates: ReplicateCounts,
    ) -> Self {
        let [pr, far, rp_factual, rp_counterfactual] = intervals;
        Self {
            pr,
            far,
            rp_factual,
            rp_counterfactual,
            point,
            threshold,
            family,
            factual_fit: fits.0,
            counterfactual_fit: fits.1,
            confidence_level,
            interval_method,
            seed,
            replicates,
        }
    }

    /// Probability ratio.
    pub fn pr(&self) -> Estimate {
        self.pr
    }

    /// Fraction of attributable risk.
    pub fn far(&self) -> Estimate {
        self.far
    }

    /// Return period under factual forcing.
    pub fn rp_factual(&self) -> Estimate {
        self.rp_factual
    }

    /// Return period under counterfactual forcing.
    pub fn rp_counterfactual(&self) -> Estimate {
        self.rp_counterfactual
    }

    /// Metrics of the unmodified samples.
    pub fn point(&self) -> PointEstimate {
        self.point
    }

    /// Threshold evaluated.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Exceedance direction.
    pub fn direction(&self) -> Direction {
        self.threshold.direction()
    }

    /// Distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Fit of the unmodified factual sample.
    pub fn factual_fit(&self) -> &FittedDistribution {
        &self.factual_fit
    }

    /// Fit of the unmodified counterfactual sample.
    pub fn counterfactual_fit(&self) -> &FittedDistribution {
        &self.counterfactual_fit
    }

    /// Confidence level of the intervals.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// How the intervals were derived.
    pub fn interval_method(&self) -> IntervalMethod {
        self.interval_method
    }

    /// Resampling seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replicate bookkeeping.
    pub fn replicates(&self) -> ReplicateCounts {
        self.replicates
    }
}
