//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::config::*;

use climattr_attribution::{AttributionConfig, CurveConfig, DEFAULT_SEED, IntervalMethod, Threshold};
use climattr_distribution::Family;
use climattr_scaling::{DatedSeries, ScalingMethod, ScalingSpec};

/// Parses a distribution family name (`normal`, `gumbel`, `gev`, `gamma`).
pub fn parse_family(s: &str) -> Result<Family> {
    Ok(s.parse::<Family>()?)
}

/// Parses an interval method name (`percentile` or `normal`).
pub fn parse_interval_method(s: &str) -> Result<IntervalMethod> {
    Ok(s.parse::<IntervalMethod>()?)
}

/// Parses a scaling method name (`add`, `mult`, ...).
pub fn parse_scaling_method(s: &str) -> Result<ScalingMethod> {
    Ok(s.parse::<ScalingMethod>()?)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

/// Builds the event [`Threshold`] from the `[metrics]` section.
pub fn build_threshold(m: &MetricsToml) -> Result<Threshold> {
    let Some(value) = m.threshold else {
        bail!("no threshold: set [metrics].threshold in config");
    };
    Ok(Threshold::parse(value, &m.direction)?)
}

/// Builds an [`AttributionConfig`] from the `[metrics]` section.
///
/// Without a seed the library default is used, so runs stay reproducible.
pub fn build_attribution_config(m: &MetricsToml, seed: Option<u64>) -> Result<AttributionConfig> {
    let cfg = AttributionConfig::new()
        .with_replicate_count(m.replicate_count)
        .with_seed(seed.unwrap_or(DEFAULT_SEED))
        .with_confidence_level(m.confidence_level)
        .with_max_excluded_fraction(m.max_excluded_fraction)
        .with_interval_method(parse_interval_method(&m.interval_method)?)
        .with_parallel(m.parallel);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`CurveConfig`] from the `[curve]` section.
pub fn build_curve_config(c: &CurveToml, seed: Option<u64>) -> Result<CurveConfig> {
    let cfg = CurveConfig::new()
        .with_replicate_count(c.replicate_count)
        .with_seed(seed.unwrap_or(DEFAULT_SEED))
        .with_confidence_level(c.confidence_level)
        .with_return_periods(c.return_periods.clone());
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ScalingSpec`] from the `[scaling]` section and a loaded climatology.
pub fn build_scaling_spec(s: &ScalingToml, climatology: DatedSeries) -> Result<ScalingSpec> {
    let start = parse_date(&s.start).context("invalid [scaling].start")?;
    let end = parse_date(&s.end).context("invalid [scaling].end")?;
    if start > end {
        bail!("[scaling] window starts after it ends: {start} > {end}");
    }
    let method = parse_scaling_method(&s.method)?;
    Ok(ScalingSpec::new(climatology, start, end, method))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> ClimattrConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn full_config_converts() {
        let config = parse(
            r#"
            seed = 7

            [input]
            factual = "all.txt"
            counterfactual = "nat.txt"

            [metrics]
            family = "gumbel"
            threshold = 32.5
            direction = "descending"
            replicate_count = 200
            interval_method = "normal"
            parallel = false

            [scaling]
            start = "1991-01-01"
            end = "2020-12-31"
            method = "mult"

            [curve]
            return_periods = [10.0, 100.0]
            "#,
        );

        assert_eq!(parse_family(&config.metrics.family).unwrap(), Family::Gumbel);
        let threshold = build_threshold(&config.metrics).unwrap();
        assert_eq!(threshold.value(), 32.5);
        assert_eq!(threshold.direction().name(), "descending");

        let attr = build_attribution_config(&config.metrics, config.seed).unwrap();
        assert_eq!(attr.seed(), 7);
        assert_eq!(attr.replicate_count(), 200);
        assert_eq!(attr.interval_method(), IntervalMethod::Normal);
        assert!(!attr.parallel());

        let curve = build_curve_config(&config.curve, config.seed).unwrap();
        assert_eq!(curve.return_periods(), &[10.0, 100.0]);
        assert_eq!(curve.replicate_count(), 1000);

        let scaling = config.scaling.as_ref().unwrap();
        let clim = DatedSeries::new(vec![parse_date("2000-06-01").unwrap()], vec![3.0]).unwrap();
        let spec = build_scaling_spec(scaling, clim).unwrap();
        assert_eq!(spec.method(), ScalingMethod::Multiplicative);
        assert_eq!(
            spec.baseline_window(),
            (parse_date("1991-01-01").unwrap(), parse_date("2020-12-31").unwrap())
        );
    }

    #[test]
    fn defaults_apply() {
        let config = parse("[metrics]\nthreshold = 1.0\n");
        assert!(config.seed.is_none());
        assert!(config.scaling.is_none());
        assert_eq!(config.input.factual_label, "factual");
        assert_eq!(parse_family(&config.metrics.family).unwrap(), Family::Gev);
        let attr = build_attribution_config(&config.metrics, config.seed).unwrap();
        assert_eq!(attr.seed(), DEFAULT_SEED);
        assert_eq!(attr.confidence_level(), 0.95);
        assert_eq!(attr.interval_method(), IntervalMethod::Percentile);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<ClimattrConfig>("[metrics]\nthreshhold = 1.0\n").is_err());
        assert!(toml::from_str::<ClimattrConfig>("[plot]\n").is_err());
    }

    #[test]
    fn missing_threshold_bails() {
        let err = build_threshold(&MetricsToml::default()).unwrap_err();
        assert!(err.to_string().contains("[metrics].threshold"));
    }

    #[test]
    fn bad_strings_bail() {
        assert!(parse_family("weibull").is_err());
        assert!(parse_interval_method("bca").is_err());
        assert!(parse_scaling_method("log").is_err());
        assert!(parse_date("01/02/2003").is_err());

        let mut m = MetricsToml {
            threshold: Some(1.0),
            direction: "upwards".to_string(),
            ..MetricsToml::default()
        };
        assert!(build_threshold(&m).is_err());
        m.confidence_level = 1.5;
        assert!(build_attribution_config(&m, None).is_err());
    }

    #[test]
    fn reversed_window_bails() {
        let s = ScalingToml {
            start: "2020-01-01".to_string(),
            end: "1990-01-01".to_string(),
            method: "add".to_string(),
        };
        let clim = DatedSeries::new(vec![], vec![]).unwrap();
        assert!(build_scaling_spec(&s, clim).is_err());
    }
}
