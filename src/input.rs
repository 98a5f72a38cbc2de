//! Reading inputs and writing results.
//!
//! Series files hold one value per line; blank lines and anything after
//! `#` are ignored. Climatology files are two-column CSV (`date,value`),
//! read by position so any header names are accepted. The header row is
//! optional and lines starting with `#` are skipped.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use climattr_attribution::Sample;
use climattr_scaling::DatedSeries;
use tracing::info;

use crate::config::ClimattrConfig;
use crate::convert::{self, parse_date};

/// Content lines with their 1-based line numbers, comments stripped.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.split('#').next().unwrap_or("").trim();
        (!line.is_empty()).then_some((i + 1, line))
    })
}

fn parse_value(field: &str, line_no: usize) -> Result<f64> {
    let v: f64 = field
        .trim()
        .parse()
        .with_context(|| format!("line {line_no}: invalid number {field:?}"))?;
    if !v.is_finite() {
        bail!("line {line_no}: non-finite value {field:?}");
    }
    Ok(v)
}

/// Parses a one-value-per-line series.
pub fn parse_series(text: &str) -> Result<Vec<f64>> {
    content_lines(text)
        .map(|(n, line)| parse_value(line, n))
        .collect()
}

/// A first row is a header when neither column parses.
fn is_header(record: &csv::StringRecord) -> bool {
    let date_fails = record.get(0).is_none_or(|d| parse_date(d).is_err());
    let value_fails = record.get(1).is_some_and(|v| v.parse::<f64>().is_err());
    date_fails && value_fails
}

/// Parses `date,value` CSV into a [`DatedSeries`].
pub fn parse_climatology(text: &str) -> Result<DatedSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.context("malformed climatology CSV")?;
        let line = record.position().map_or(0, |p| p.line());
        if idx == 0 && is_header(&record) {
            continue;
        }
        let (date, value): (NaiveDate, f64) = record
            .deserialize(None)
            .with_context(|| format!("line {line}: expected `date,value`, got {record:?}"))?;
        if !value.is_finite() {
            bail!("line {line}: non-finite value {value}");
        }
        dates.push(date);
        values.push(value);
    }
    Ok(DatedSeries::new(dates, values)?)
}

/// Reads a series file.
pub fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    parse_series(&text).with_context(|| format!("failed to parse series: {}", path.display()))
}

/// Reads a climatology CSV file.
pub fn read_climatology(path: &Path) -> Result<DatedSeries> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read climatology: {}", path.display()))?;
    parse_climatology(&text)
        .with_context(|| format!("failed to parse climatology: {}", path.display()))
}

/// Loads and parses the TOML project file.
pub fn read_config(path: &Path) -> Result<ClimattrConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Reads both samples named in `[input]`, scaled against the climatology
/// when a `[scaling]` section is present.
pub fn load_samples(config: &ClimattrConfig) -> Result<(Sample, Sample)> {
    let input = &config.input;
    let factual_path = input
        .factual
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no factual series: set [input].factual in config"))?;
    let counterfactual_path = input.counterfactual.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no counterfactual series: set [input].counterfactual in config")
    })?;

    let factual = Sample::new(&input.factual_label, read_series(factual_path)?);
    let counterfactual = Sample::new(&input.counterfactual_label, read_series(counterfactual_path)?);
    info!(
        n_factual = factual.len(),
        n_counterfactual = counterfactual.len(),
        "samples loaded"
    );

    let Some(scaling) = &config.scaling else {
        return Ok((factual, counterfactual));
    };
    let clim_path = input.climatology.as_ref().ok_or_else(|| {
        anyhow::anyhow!("[scaling] requires a climatology: set [input].climatology in config")
    })?;
    let spec = convert::build_scaling_spec(scaling, read_climatology(clim_path)?)?;
    let factual = factual
        .scaled(&spec)
        .with_context(|| format!("failed to scale {}", factual.label()))?;
    let counterfactual = counterfactual
        .scaled(&spec)
        .with_context(|| format!("failed to scale {}", counterfactual.label()))?;
    info!(method = %spec.method(), "samples scaled to baseline");
    Ok((factual, counterfactual))
}

/// Writes `text` to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Formats a series one value per line.
pub fn format_series(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 12);
    for v in values {
        let _ = writeln!(out, "{v}");
    }
    out
}
