//! Extreme-event attribution: how much more likely is a threshold
//! exceedance under factual forcing than under natural forcing alone?
//!
//! # Pipeline
//!
//! 1. **Fit** the chosen family to the factual and counterfactual samples
//! 2. **Evaluate** the exceedance probability of the threshold under each fit
//! 3. **Derive** PR, FAR and return periods from the two probabilities
//! 4. **Bootstrap** paired resamples (seeded) and repeat steps 1-3 per
//!    replicate, excluding replicates whose fit or probability fails
//! 5. **Summarise** the replicate population into central values and
//!    confidence intervals
//!
//! # Glossary
//!
//! - **PR**: probability ratio, `p_factual / p_counterfactual`
//! - **FAR**: fraction of attributable risk, `1 - 1 / PR`
//! - **RP**: return period, `1 / p`, in sampling intervals (years for
//!   annual maxima)
//!
//! # Quick Start
//!
//! ```no_run
//! use climattr_attribution::{
//!     AttributionConfig, Sample, Threshold, attribution_metrics,
//! };
//! use climattr_distribution::{Direction, Family};
//!
//! let factual = Sample::factual(vec![31.0, 29.5, 33.2, 30.8, 32.1, 28.7]);
//! let counterfactual = Sample::counterfactual(vec![28.4, 27.9, 30.1, 29.0, 26.8, 28.2]);
//! let threshold = Threshold::new(32.0, Direction::Ascending)?;
//! let config = AttributionConfig::new().with_replicate_count(500);
//!
//! let metrics = attribution_metrics(&factual, &counterfactual, Family::Normal, threshold, &config)?;
//! println!("PR = {:.2} [{:.2}, {:.2}]", metrics.pr().central, metrics.pr().low, metrics.pr().high);
//! # Ok::<(), climattr_attribution::AttributionError>(())
//! ```

mod bootstrap;
mod config;
mod curve;
mod error;
mod estimate;
mod metrics;
mod result;
mod sample;
mod threshold;

pub use bootstrap::{BootstrapReplicate, BootstrapResampler};
pub use config::{AttributionConfig, CurveConfig, DEFAULT_SEED, IntervalMethod};
pub use curve::{CurvePoint, ReturnLevel, ReturnPeriodCurve, return_period_curve};
pub use error::AttributionError;
pub use estimate::Estimate;
pub use metrics::attribution_metrics;
pub use result::{AttributionMetrics, PointEstimate, ReplicateCounts};
pub use sample::Sample;
pub use threshold::{Threshold, ThresholdEvaluator};
