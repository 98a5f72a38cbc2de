//! Empirical return-period curve of one sample with bootstrap bands.

use climattr_distribution::{Direction, DistributionModel, Family, FittedDistribution};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::bootstrap::resample_indices;
use crate::config::CurveConfig;
use crate::error::AttributionError;
use crate::sample::Sample;

/// One observation on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// 1-based rank, 1 being the most extreme observation.
    pub rank: usize,
    /// Observed value.
    pub value: f64,
    /// Return period of `value` under the fitted distribution.
    pub return_period: f64,
    /// Lower bootstrap bound of the value at this rank.
    pub value_low: f64,
    /// Upper bootstrap bound of the value at this rank.
    pub value_high: f64,
    /// Lower bootstrap bound of the return period at this rank.
    pub return_period_low: f64,
    /// Upper bootstrap bound of the return period at this rank.
    pub return_period_high: f64,
}

/// Fitted value reached on average once per `return_period`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnLevel {
    /// Return period, in sampling intervals.
    pub return_period: f64,
    /// Level of the fitted distribution for that period.
    pub level: f64,
}

/// The output of [`return_period_curve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPeriodCurve {
    label: String,
    direction: Direction,
    fit: FittedDistribution,
    confidence_level: f64,
    points: Vec<CurvePoint>,
    return_levels: Vec<ReturnLevel>,
}

impl ReturnPeriodCurve {
    /// Label of the sample the curve was built from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Exceedance direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Distribution fitted to the whole sample.
    pub fn fit(&self) -> &FittedDistribution {
        &self.fit
    }

    /// Confidence level of the bands.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Observations, most extreme first.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Fitted return levels for the configured return periods.
    pub fn return_levels(&self) -> &[ReturnLevel] {
        &self.return_levels
    }

    /// The observation closest to `value`.
    pub fn nearest(&self, value: f64) -> Option<&CurvePoint> {
        self.points
            .iter()
            .min_by(|a, b| (a.value - value).abs().total_cmp(&(b.value - value).abs()))
    }
}

/// Per-rank lower and upper percentiles over bootstrap replicates.
///
/// `columns[r]` holds the value at rank `r` of every replicate.
fn rank_bands(columns: &mut [Vec<f64>], confidence_level: f64) -> Vec<(f64, f64)> {
    let (lo_p, hi_p) = climattr_stats::two_sided_bounds(confidence_level);
    columns
        .iter_mut()
        .map(|col| {
            col.sort_by(f64::total_cmp);
            (
                climattr_stats::quantile_type7(col, lo_p),
                climattr_stats::quantile_type7(col, hi_p),
            )
        })
        .collect()
}

/// Builds the return-period curve of `sample` under `family`.
///
/// Observations are ranked most extreme first and paired with their fitted
/// return period. The sample is then resampled `config.replicate_count()`
/// times; each replicate is ranked the same way and per-rank percentiles
/// give the value band. The same resamples applied to the return-period
/// vector, ranked longest first, give the return-period band.
///
/// # Errors
///
/// - [`AttributionError::InvalidConfig`] for an invalid configuration.
/// - [`AttributionError::InvalidSample`] if the sample cannot be fitted.
/// - [`AttributionError::FitConvergence`] if the fit fails.
/// - [`AttributionError::DegenerateProbability`] if an observation has a
///   fitted probability of 0 or 1.
#[tracing::instrument(skip(sample, config), fields(label = sample.label(), n = sample.len()))]
pub fn return_period_curve(
    sample: &Sample,
    family: Family,
    direction: Direction,
    config: &CurveConfig,
) -> Result<ReturnPeriodCurve, AttributionError> {
    config.validate()?;
    sample.validate(family)?;
    let label = sample.label();

    let fit = family
        .fit(sample.values())
        .map_err(|e| AttributionError::for_sample(label, e))?;

    let mut values = sample.values().to_vec();
    direction.sort_most_extreme_first(&mut values);
    let return_periods = values
        .iter()
        .map(|&x| {
            fit.exceedance_probability(x, direction)
                .map(|p| 1.0 / p)
                .map_err(|e| AttributionError::for_sample(label, e))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    // --- Bootstrap bands ---
    let n = values.len();
    let mut rng = StdRng::seed_from_u64(config.seed());
    let mut value_columns = vec![Vec::with_capacity(config.replicate_count()); n];
    let mut rp_columns = vec![Vec::with_capacity(config.replicate_count()); n];
    for _ in 0..config.replicate_count() {
        let indices = resample_indices(n, &mut rng);
        let mut v: Vec<f64> = indices.iter().map(|&i| values[i]).collect();
        let mut rp: Vec<f64> = indices.iter().map(|&i| return_periods[i]).collect();
        direction.sort_most_extreme_first(&mut v);
        rp.sort_by(|a, b| b.total_cmp(a));
        for (rank, (x, r)) in v.into_iter().zip(rp).enumerate() {
            value_columns[rank].push(x);
            rp_columns[rank].push(r);
        }
    }
    let value_bands = rank_bands(&mut value_columns, config.confidence_level());
    let rp_bands = rank_bands(&mut rp_columns, config.confidence_level());

    let points = values
        .iter()
        .zip(&return_periods)
        .zip(value_bands.iter().zip(&rp_bands))
        .enumerate()
        .map(|(i, ((&value, &return_period), (vb, rb)))| CurvePoint {
            rank: i + 1,
            value,
            return_period,
            value_low: vb.0,
            value_high: vb.1,
            return_period_low: rb.0,
            return_period_high: rb.1,
        })
        .collect();

    let model = *fit.model();
    let return_levels = config
        .return_periods()
        .iter()
        .map(|&t| {
            let p = match direction {
                Direction::Ascending => 1.0 - 1.0 / t,
                Direction::Descending => 1.0 / t,
            };
            ReturnLevel {
                return_period: t,
                level: model.quantile(p),
            }
        })
        .collect();

    debug!(%family, %direction, "return-period curve built");
    Ok(ReturnPeriodCurve {
        label: label.to_string(),
        direction,
        fit: model,
        confidence_level: config.confidence_level(),
        points,
        return_levels,
    })
}
