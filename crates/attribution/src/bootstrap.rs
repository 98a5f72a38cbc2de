//! Paired bootstrap resampling of the factual and counterfactual samples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AttributionError;
use crate::sample::Sample;

/// One resampled realisation of both inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReplicate {
    /// Zero-based position in the replicate sequence.
    pub index: usize,
    /// Indices into the factual sample that produced `factual`.
    pub factual_indices: Vec<usize>,
    /// Indices into the counterfactual sample that produced `counterfactual`.
    pub counterfactual_indices: Vec<usize>,
    /// Resampled factual values.
    pub factual: Vec<f64>,
    /// Resampled counterfactual values.
    pub counterfactual: Vec<f64>,
}

/// Draws `n` indices uniformly with replacement from `0..n`.
pub(crate) fn resample_indices(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..n).map(|_| rng.random_range(0..n)).collect()
}

/// Lazy sequence of `replicate_count` paired bootstrap replicates.
///
/// Each replicate draws the factual indices first, then the counterfactual
/// indices, from a single generator seeded with `seed`. Constructing a new
/// resampler with the same inputs and seed replays the sequence exactly.
#[derive(Debug, Clone)]
pub struct BootstrapResampler<'a> {
    factual: &'a Sample,
    counterfactual: &'a Sample,
    rng: StdRng,
    next_index: usize,
    replicate_count: usize,
}

impl<'a> BootstrapResampler<'a> {
    /// Creates a resampler over two samples.
    ///
    /// # Errors
    ///
    /// - [`AttributionError::InvalidConfig`] if `replicate_count` is zero.
    /// - [`AttributionError::InvalidSample`] if either sample is empty.
    pub fn new(
        factual: &'a Sample,
        counterfactual: &'a Sample,
        replicate_count: usize,
        seed: u64,
    ) -> Result<Self, AttributionError> {
        if replicate_count == 0 {
            return Err(AttributionError::InvalidConfig {
                reason: "replicate_count must be >= 1".to_string(),
            });
        }
        for sample in [factual, counterfactual] {
            if sample.is_empty() {
                return Err(AttributionError::InvalidSample {
                    label: sample.label().to_string(),
                    n: 0,
                    reason: "cannot resample an empty sample".to_string(),
                });
            }
        }
        Ok(Self {
            factual,
            counterfactual,
            rng: StdRng::seed_from_u64(seed),
            next_index: 0,
            replicate_count,
        })
    }

    /// Total number of replicates this resampler yields.
    pub fn replicate_count(&self) -> usize {
        self.replicate_count
    }
}

impl Iterator for BootstrapResampler<'_> {
    type Item = BootstrapReplicate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.replicate_count {
            return None;
        }
        let factual_indices = resample_indices(self.factual.len(), &mut self.rng);
        let counterfactual_indices = resample_indices(self.counterfactual.len(), &mut self.rng);
        let replicate = BootstrapReplicate {
            index: self.next_index,
            factual: self.factual.pick(&factual_indices),
            counterfactual: self.counterfactual.pick(&counterfactual_indices),
            factual_indices,
            counterfactual_indices,
        };
        self.next_index += 1;
        Some(replicate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.replicate_count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BootstrapResampler<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> (Sample, Sample) {
        (
            Sample::factual((0..12).map(f64::from).collect()),
            Sample::counterfactual((0..7).map(|i| f64::from(i) * 10.0).collect()),
        )
    }

    #[test]
    fn exact_length() {
        let (f, c) = samples();
        let mut it = BootstrapResampler::new(&f, &c, 5, 1).unwrap();
        assert_eq!(it.len(), 5);
        it.next();
        assert_eq!(it.len(), 4);
        assert_eq!(it.count(), 4);
    }

    #[test]
    fn sizes_and_values_match_indices() {
        let (f, c) = samples();
        for rep in BootstrapResampler::new(&f, &c, 20, 3).unwrap() {
            assert_eq!(rep.factual.len(), f.len());
            assert_eq!(rep.counterfactual.len(), c.len());
            for (&i, &v) in rep.factual_indices.iter().zip(&rep.factual) {
                assert_eq!(f.values()[i], v);
            }
            for (&i, &v) in rep.counterfactual_indices.iter().zip(&rep.counterfactual) {
                assert_eq!(c.values()[i], v);
            }
        }
    }

    #[test]
    fn same_seed_replays() {
        let (f, c) = samples();
        let a: Vec<_> = BootstrapResampler::new(&f, &c, 10, 42).unwrap().collect();
        let b: Vec<_> = BootstrapResampler::new(&f, &c, 10, 42).unwrap().collect();
        assert_eq!(a, b);
        let other: Vec<_> = BootstrapResampler::new(&f, &c, 10, 43).unwrap().collect();
        assert_ne!(a, other);
    }

    #[test]
    fn indices_are_sequential() {
        let (f, c) = samples();
        let idx: Vec<usize> = BootstrapResampler::new(&f, &c, 4, 0)
            .unwrap()
            .map(|r| r.index)
            .collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn zero_replicates_rejected() {
        let (f, c) = samples();
        assert!(matches!(
            BootstrapResampler::new(&f, &c, 0, 42),
            Err(AttributionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn empty_sample_rejected() {
        let (f, _) = samples();
        let empty = Sample::counterfactual(vec![]);
        assert!(matches!(
            BootstrapResampler::new(&f, &empty, 3, 42),
            Err(AttributionError::InvalidSample { n: 0, .. })
        ));
    }
}
