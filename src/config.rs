use std::path::PathBuf;

use serde::Deserialize;

/// Top-level climattr configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimattrConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Input series.
    #[serde(default)]
    pub input: InputToml,

    /// Attribution metric settings.
    #[serde(default)]
    pub metrics: MetricsToml,

    /// Optional baseline scaling applied to both samples.
    #[serde(default)]
    pub scaling: Option<ScalingToml>,

    /// Return-period curve settings.
    #[serde(default)]
    pub curve: CurveToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    pub factual: Option<PathBuf>,
    pub counterfactual: Option<PathBuf>,
    pub climatology: Option<PathBuf>,
    #[serde(default = "default_factual_label")]
    pub factual_label: String,
    #[serde(default = "default_counterfactual_label")]
    pub counterfactual_label: String,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            factual: None,
            counterfactual: None,
            climatology: None,
            factual_label: default_factual_label(),
            counterfactual_label: default_counterfactual_label(),
        }
    }
}

fn default_factual_label() -> String {
    "factual".to_string()
}
fn default_counterfactual_label() -> String {
    "counterfactual".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsToml {
    #[serde(default = "default_family")]
    pub family: String,
    pub threshold: Option<f64>,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_replicate_count")]
    pub replicate_count: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_max_excluded_fraction")]
    pub max_excluded_fraction: f64,
    #[serde(default = "default_interval_method")]
    pub interval_method: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for MetricsToml {
    fn default() -> Self {
        Self {
            family: default_family(),
            threshold: None,
            direction: default_direction(),
            replicate_count: default_replicate_count(),
            confidence_level: default_confidence_level(),
            max_excluded_fraction: default_max_excluded_fraction(),
            interval_method: default_interval_method(),
            parallel: true,
        }
    }
}

fn default_family() -> String {
    "gev".to_string()
}
fn default_direction() -> String {
    "ascending".to_string()
}
fn default_replicate_count() -> usize {
    1000
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_max_excluded_fraction() -> f64 {
    0.5
}
fn default_interval_method() -> String {
    "percentile".to_string()
}
fn default_true() -> bool {
    true
}

/// Baseline window dates are `YYYY-MM-DD` strings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingToml {
    pub start: String,
    pub end: String,
    #[serde(default = "default_scaling_method")]
    pub method: String,
}

fn default_scaling_method() -> String {
    "additive".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveToml {
    #[serde(default = "default_replicate_count")]
    pub replicate_count: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_return_periods")]
    pub return_periods: Vec<f64>,
}

impl Default for CurveToml {
    fn default() -> Self {
        Self {
            replicate_count: default_replicate_count(),
            confidence_level: default_confidence_level(),
            return_periods: default_return_periods(),
        }
    }
}

fn default_return_periods() -> Vec<f64> {
    vec![2.0, 5.0, 10.0, 20.0, 50.0, 100.0]
}
