use approx::assert_relative_eq;
use climattr_distribution::{
    Direction, DistributionError, DistributionModel, Family, FittedDistribution, GammaParams,
    GevParams, GumbelParams, NormalParams, exceedance_probability, fit,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Gamma as GammaDist, Gumbel, Normal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normal_sample(mean: f64, sd: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, sd).expect("valid normal params");
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Annual maxima of 30 daily Normal(25, 3) draws, a realistic GEV input.
fn block_maxima(n_years: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(25.0, 3.0).expect("valid normal params");
    (0..n_years)
        .map(|_| {
            (0..30)
                .map(|_| dist.sample(&mut rng))
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. every family fits its own kind of data
// ---------------------------------------------------------------------------
#[test]
fn all_families_fit_plausible_data() {
    let mut rng = StdRng::seed_from_u64(3);
    let gamma = GammaDist::new(3.0, 2.0).expect("valid gamma params");
    let positive: Vec<f64> = (0..500).map(|_| gamma.sample(&mut rng)).collect();

    for family in Family::ALL {
        let data = if family == Family::Gamma {
            positive.clone()
        } else {
            block_maxima(200, 5)
        };
        let fitted = fit(&data, family).unwrap();
        assert_eq!(fitted.family(), family);
        assert_eq!(fitted.params().len(), family.n_params());
        assert_eq!(fitted.n_obs(), data.len());
        assert!(fitted.log_likelihood().is_finite(), "{family}");
    }
}

// ---------------------------------------------------------------------------
// 2. exceedance is monotone in the threshold
// ---------------------------------------------------------------------------
#[test]
fn exceedance_monotone_in_threshold() {
    let data = block_maxima(150, 11);
    for family in [Family::Normal, Family::Gumbel, Family::Gev] {
        let fitted = fit(&data, family).unwrap();
        let thresholds: Vec<f64> = (0..20).map(|i| 28.0 + 0.5 * i as f64).collect();
        let up: Vec<f64> = thresholds
            .iter()
            .filter_map(|&t| exceedance_probability(&fitted, t, Direction::Ascending).ok())
            .collect();
        let down: Vec<f64> = thresholds
            .iter()
            .filter_map(|&t| exceedance_probability(&fitted, t, Direction::Descending).ok())
            .collect();
        assert!(up.windows(2).all(|w| w[1] <= w[0]), "{family}: {up:?}");
        assert!(down.windows(2).all(|w| w[1] >= w[0]), "{family}: {down:?}");
    }
}

// ---------------------------------------------------------------------------
// 3. normal fit matches the closed form
// ---------------------------------------------------------------------------
#[test]
fn normal_fit_known_values() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let fitted = fit(&data, Family::Normal).unwrap();
    let params = fitted.params();
    assert_relative_eq!(params[0], 3.0, epsilon = 1e-12);
    // Population standard deviation: sqrt(2).
    assert_relative_eq!(params[1], 2f64.sqrt(), epsilon = 1e-12);

    let p = fitted.exceedance_probability(3.0, Direction::Ascending).unwrap();
    assert_relative_eq!(p, 0.5, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// 4. MLE never loses to an arbitrary nearby parameter vector
// ---------------------------------------------------------------------------
#[test]
fn gumbel_mle_is_a_local_maximum() {
    let mut rng = StdRng::seed_from_u64(21);
    let dist = Gumbel::new(10.0, 2.0).expect("valid gumbel params");
    let data: Vec<f64> = (0..300).map(|_| dist.sample(&mut rng)).collect();
    let fitted = fit(&data, Family::Gumbel).unwrap();
    let best = fitted.log_likelihood();
    let p = fitted.params();
    for (dl, ds) in [(0.05, 0.0), (-0.05, 0.0), (0.0, 0.05), (0.0, -0.05)] {
        let other = FittedDistribution::from_params(Family::Gumbel, &[p[0] + dl, p[1] + ds])
            .unwrap()
            .log_likelihood(&data);
        assert!(best >= other - 1e-8, "{best} < {other} at ({dl}, {ds})");
    }
}

// ---------------------------------------------------------------------------
// 5. return level and return period are inverse
// ---------------------------------------------------------------------------
#[test]
fn quantile_gives_return_level() {
    let data = normal_sample(30.0, 2.0, 400, 8);
    let fitted = fit(&data, Family::Gev).unwrap();
    for period in [2.0, 10.0, 50.0] {
        let level = fitted.model().quantile(1.0 - 1.0 / period);
        let p = fitted
            .exceedance_probability(level, Direction::Ascending)
            .unwrap();
        assert_relative_eq!(1.0 / p, period, max_relative = 1e-6);
    }
}

#[test]
fn quantile_outside_unit_interval_is_nan() {
    let models: [Box<dyn DistributionModel>; 4] = [
        Box::new(NormalParams::new(30.0, 2.0).unwrap()),
        Box::new(GumbelParams::new(30.0, 2.0).unwrap()),
        Box::new(GevParams::new(30.0, 2.0, 0.1).unwrap()),
        Box::new(GammaParams::new(2.0, 3.0).unwrap()),
    ];
    for (i, m) in models.iter().enumerate() {
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(m.quantile(p).is_nan(), "model {i}, p = {p}");
        }
        assert!(m.quantile(0.5).is_finite(), "model {i}");
    }
}

// ---------------------------------------------------------------------------
// 6. error cases
// ---------------------------------------------------------------------------
#[test]
fn single_value_is_invalid_sample() {
    let result = fit(&[5.0], Family::Normal);
    assert!(
        matches!(result, Err(DistributionError::InvalidSample { n: 1, .. })),
        "expected InvalidSample, got {result:?}"
    );
}

#[test]
fn constant_sample_fails_to_converge() {
    for family in [Family::Gumbel, Family::Gev, Family::Gamma] {
        let result = fit(&[4.0; 12], family);
        assert!(
            matches!(result, Err(DistributionError::FitConvergence { .. })),
            "{family}: expected FitConvergence, got {result:?}"
        );
    }
}

#[test]
fn threshold_beyond_support_is_degenerate() {
    let data = normal_sample(30.0, 2.0, 100, 1);
    let fitted = fit(&data, Family::Normal).unwrap();
    let result = fitted.exceedance_probability(1e3, Direction::Ascending);
    assert!(matches!(
        result,
        Err(DistributionError::DegenerateProbability { threshold, .. }) if threshold == 1e3
    ));
}

#[test]
fn direction_parse_errors() {
    assert_eq!("ascending".parse::<Direction>().unwrap(), Direction::Ascending);
    assert!(matches!(
        "sideways".parse::<Direction>(),
        Err(DistributionError::InvalidDirection { .. })
    ));
}
