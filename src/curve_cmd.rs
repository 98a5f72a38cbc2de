//! Curve command: return-period curves of both samples.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use climattr_attribution::return_period_curve;
use climattr_distribution::Direction;

use crate::cli::CurveArgs;
use crate::convert;
use crate::input;

/// Run the return-period curve pipeline.
pub fn run(args: CurveArgs) -> Result<()> {
    let _cmd = info_span!("curve").entered();
    let config = input::read_config(&args.config)?;
    let seed = args.seed.or(config.seed);

    let family = convert::parse_family(&config.metrics.family)?;
    let direction: Direction = config.metrics.direction.parse()?;
    let curve_cfg = convert::build_curve_config(&config.curve, seed)?;

    let (factual, counterfactual) = input::load_samples(&config)?;

    info!(%family, %direction, replicates = curve_cfg.replicate_count(), "building curves");
    let curves = [&factual, &counterfactual]
        .into_iter()
        .map(|sample| {
            return_period_curve(sample, family, direction, &curve_cfg)
                .with_context(|| format!("return-period curve failed for {}", sample.label()))
        })
        .collect::<Result<Vec<_>>>()?;

    let json = serde_json::to_string_pretty(&curves).context("failed to serialize curves")?;
    input::write_output(&json, args.output.as_deref())
}
