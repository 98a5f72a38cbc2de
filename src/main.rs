mod cli;
mod config;
mod convert;
mod curve_cmd;
mod input;
mod logging;
mod metrics_cmd;
mod scale_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Metrics(args) => metrics_cmd::run(args),
        Command::Curve(args) => curve_cmd::run(args),
        Command::Scale(args) => scale_cmd::run(args),
    }
}
