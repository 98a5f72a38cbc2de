use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// climattr extreme-event attribution.
#[derive(Parser)]
#[command(
    name = "climattr",
    version,
    about = "Probability ratio, FAR and return periods for extreme-event attribution"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Bootstrap PR, FAR and return periods for a factual/counterfactual pair.
    Metrics(MetricsArgs),
    /// Return-period curves of both samples with bootstrap bands.
    Curve(CurveArgs),
    /// Express a series relative to a climatological baseline.
    Scale(ScaleArgs),
}

/// Arguments for the `metrics` subcommand.
#[derive(clap::Args)]
pub struct MetricsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "climattr.toml")]
    pub config: PathBuf,

    /// Path for the JSON result. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `curve` subcommand.
#[derive(clap::Args)]
pub struct CurveArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "climattr.toml")]
    pub config: PathBuf,

    /// Path for the JSON result. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `scale` subcommand.
#[derive(clap::Args)]
pub struct ScaleArgs {
    /// Series to scale, one value per line.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Reference climatology as `date,value` CSV.
    #[arg(long)]
    pub climatology: PathBuf,

    /// First day of the baseline window (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,

    /// Last day of the baseline window (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub end: String,

    /// Scaling method: `add` or `mult`.
    #[arg(short, long, default_value = "add")]
    pub method: String,

    /// Path for the scaled series. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
