//! Metrics command: bootstrap PR, FAR and return periods.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use climattr_attribution::attribution_metrics;

use crate::cli::MetricsArgs;
use crate::convert;
use crate::input;

/// Run the attribution metrics pipeline.
pub fn run(args: MetricsArgs) -> Result<()> {
    let _cmd = info_span!("metrics").entered();
    // 1. Load project TOML
    let config = input::read_config(&args.config)?;
    let seed = args.seed.or(config.seed);

    // 2. Build typed settings before touching the data
    let family = convert::parse_family(&config.metrics.family)?;
    let threshold = convert::build_threshold(&config.metrics)?;
    let attr_cfg = convert::build_attribution_config(&config.metrics, seed)?;

    // 3. Read (and optionally scale) both samples
    let (factual, counterfactual) = input::load_samples(&config)?;

    // 4. Bootstrap
    info!(
        %family,
        threshold = threshold.value(),
        replicates = attr_cfg.replicate_count(),
        seed = attr_cfg.seed(),
        "computing attribution metrics"
    );
    let metrics = attribution_metrics(&factual, &counterfactual, family, threshold, &attr_cfg)
        .context("attribution failed")?;

    // 5. Write JSON
    let json = serde_json::to_string_pretty(&metrics).context("failed to serialize metrics")?;
    input::write_output(&json, args.output.as_deref())
}
