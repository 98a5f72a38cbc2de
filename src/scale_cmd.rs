//! Scale command: express a series relative to a climatological baseline.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use climattr_scaling::scale;

use crate::cli::ScaleArgs;
use crate::convert;
use crate::input;

/// Run the standalone scaling step.
pub fn run(args: ScaleArgs) -> Result<()> {
    let _cmd = info_span!("scale").entered();
    let start = convert::parse_date(&args.start).context("invalid --start")?;
    let end = convert::parse_date(&args.end).context("invalid --end")?;
    let method = convert::parse_scaling_method(&args.method)?;

    let series = input::read_series(&args.input)?;
    let climatology = input::read_climatology(&args.climatology)?;

    let result = scale(&series, &climatology, start, end, method).context("scaling failed")?;
    info!(
        baseline_mean = result.baseline_mean(),
        n_baseline = result.n_baseline(),
        %method,
        "series scaled"
    );

    input::write_output(&input::format_series(result.adjusted()), args.output.as_deref())
}
