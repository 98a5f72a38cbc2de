//! Bootstrap attribution metrics: PR, FAR and return periods with intervals.

use climattr_distribution::{DistributionError, Family};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::bootstrap::{BootstrapReplicate, BootstrapResampler};
use crate::config::{AttributionConfig, IntervalMethod};
use crate::error::AttributionError;
use crate::estimate::Estimate;
use crate::result::{AttributionMetrics, PointEstimate, ReplicateCounts};
use crate::sample::Sample;
use crate::threshold::{Threshold, ThresholdEvaluator};

/// What happened to one replicate.
#[derive(Debug)]
enum Outcome {
    Used(PointEstimate),
    Excluded(DistributionError),
    Failed(DistributionError),
    Cancelled,
}

/// Fits both resampled series and derives the replicate's metrics.
fn replicate_metrics(
    replicate: &BootstrapReplicate,
    family: Family,
    evaluator: &ThresholdEvaluator,
) -> Result<PointEstimate, DistributionError> {
    let factual = family.fit(&replicate.factual)?;
    let counterfactual = family.fit(&replicate.counterfactual)?;
    let p_factual = evaluator.evaluate(&factual)?;
    let p_counterfactual = evaluator.evaluate(&counterfactual)?;
    Ok(PointEstimate::from_probabilities(p_factual, p_counterfactual))
}

fn evaluate_replicate(
    replicate: &BootstrapReplicate,
    family: Family,
    evaluator: &ThresholdEvaluator,
    config: &AttributionConfig,
) -> Outcome {
    if config.is_cancelled() {
        return Outcome::Cancelled;
    }
    match replicate_metrics(replicate, family, evaluator) {
        Ok(m) => Outcome::Used(m),
        Err(e) if e.is_numerical() => Outcome::Excluded(e),
        Err(e) => Outcome::Failed(e),
    }
}

/// Per-metric values of the replicates that were used, in replicate order.
#[derive(Debug, Default)]
struct ReplicateColumns {
    pr: Vec<f64>,
    far: Vec<f64>,
    rp_factual: Vec<f64>,
    rp_counterfactual: Vec<f64>,
}

impl ReplicateColumns {
    fn push(&mut self, m: PointEstimate) {
        self.pr.push(m.pr);
        self.far.push(m.far);
        self.rp_factual.push(m.rp_factual);
        self.rp_counterfactual.push(m.rp_counterfactual);
    }

    fn intervals(&self, cl: f64, method: IntervalMethod) -> [Estimate; 4] {
        [
            Estimate::from_replicates(&self.pr, cl, method),
            Estimate::from_replicates(&self.far, cl, method),
            Estimate::from_replicates(&self.rp_factual, cl, method),
            Estimate::from_replicates(&self.rp_counterfactual, cl, method),
        ]
    }
}

/// Walks the outcomes in replicate order, counting exclusions and
/// cancellations and checking the exclusion tolerance.
fn reduce_outcomes(
    outcomes: Vec<Outcome>,
    requested: usize,
    max_excluded_fraction: f64,
) -> Result<(ReplicateColumns, ReplicateCounts), AttributionError> {
    let mut columns = ReplicateColumns::default();
    let mut excluded = 0usize;
    let mut cancelled = 0usize;
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Outcome::Used(m) => columns.push(m),
            Outcome::Excluded(e) => {
                debug!(replicate = index, error = %e, "replicate excluded");
                excluded += 1;
            }
            Outcome::Failed(e) => return Err(e.into()),
            Outcome::Cancelled => cancelled += 1,
        }
    }

    let counts = ReplicateCounts {
        requested,
        used: columns.pr.len(),
        excluded,
        cancelled,
    };
    let attempted = counts.attempted();
    let fraction = if attempted == 0 {
        1.0
    } else {
        excluded as f64 / attempted as f64
    };
    if counts.used == 0 || fraction > max_excluded_fraction {
        return Err(AttributionError::InsufficientReplicates {
            excluded,
            attempted,
            fraction,
            tolerance: max_excluded_fraction,
        });
    }
    Ok((columns, counts))
}

/// Computes PR, FAR and return periods with bootstrap confidence intervals.
///
/// Both unmodified samples are fitted with `family` to obtain the point
/// estimates. `config.replicate_count()` paired resamples are then drawn from
/// a generator seeded with `config.seed()`, each is fitted and evaluated
/// (in parallel when `config.parallel()`), and the surviving replicate
/// metrics are summarised in replicate order with
/// `config.interval_method()`.
///
/// Replicates whose fit does not converge or whose probability is 0 or 1 are
/// excluded and counted. The result is a pure function of the inputs and
/// the seed.
///
/// # Errors
///
/// - [`AttributionError::InvalidConfig`] for an invalid configuration.
/// - [`AttributionError::InvalidSample`] if either sample cannot be fitted
///   with `family`; no fit is attempted in that case.
/// - [`AttributionError::FitConvergence`] or
///   [`AttributionError::DegenerateProbability`] when an unmodified sample
///   fails.
/// - [`AttributionError::InsufficientReplicates`] when no replicate survives
///   or the excluded fraction exceeds `config.max_excluded_fraction()`.
#[tracing::instrument(
    skip(factual, counterfactual, config),
    fields(
        n_factual = factual.len(),
        n_counterfactual = counterfactual.len(),
        threshold = threshold.value(),
        direction = %threshold.direction(),
    )
)]
pub fn attribution_metrics(
    factual: &Sample,
    counterfactual: &Sample,
    family: Family,
    threshold: Threshold,
    config: &AttributionConfig,
) -> Result<AttributionMetrics, AttributionError> {
    config.validate()?;
    factual.validate(family)?;
    counterfactual.validate(family)?;

    let evaluator = ThresholdEvaluator::new(threshold);

    // --- Point estimates from the unmodified samples ---
    let fit_and_evaluate = |sample: &Sample| {
        let fit = family
            .fit(sample.values())
            .map_err(|e| AttributionError::for_sample(sample.label(), e))?;
        let p = evaluator
            .evaluate(&fit)
            .map_err(|e| AttributionError::for_sample(sample.label(), e))?;
        Ok::<_, AttributionError>((fit, p))
    };
    let (factual_fit, p_factual) = fit_and_evaluate(factual)?;
    let (counterfactual_fit, p_counterfactual) = fit_and_evaluate(counterfactual)?;
    let point = PointEstimate::from_probabilities(p_factual, p_counterfactual);
    debug!(p_factual, p_counterfactual, pr = point.pr, "point estimates");

    // --- Map: replicates drawn sequentially, evaluated in any order ---
    let replicates: Vec<BootstrapReplicate> = BootstrapResampler::new(
        factual,
        counterfactual,
        config.replicate_count(),
        config.seed(),
    )?
    .collect();

    let outcomes: Vec<Outcome> = if config.parallel() {
        replicates
            .par_iter()
            .map(|r| evaluate_replicate(r, family, &evaluator, config))
            .collect()
    } else {
        replicates
            .iter()
            .map(|r| evaluate_replicate(r, family, &evaluator, config))
            .collect()
    };

    // --- Reduce in replicate order ---
    let (columns, counts) = reduce_outcomes(
        outcomes,
        config.replicate_count(),
        config.max_excluded_fraction(),
    )?;
    if counts.excluded > 0 || counts.cancelled > 0 {
        warn!(
            excluded = counts.excluded,
            cancelled = counts.cancelled,
            used = counts.used,
            "not all replicates were used"
        );
    }

    let cl = config.confidence_level();
    let method = config.interval_method();
    let intervals = columns.intervals(cl, method);
    info!(
        pr = intervals[0].central,
        pr_low = intervals[0].low,
        pr_high = intervals[0].high,
        used = counts.used,
        "attribution metrics computed"
    );

    Ok(AttributionMetrics::new(
        intervals,
        point,
        threshold,
        family,
        (*factual_fit.model(), *counterfactual_fit.model()),
        cl,
        method,
        config.seed(),
        counts,
    ))
}
