//! Range selection: full enumeration for small ranges, bounded uniform
//! subsampling for large ones.
//!
//! The random path draws exactly `size` distinct primes without replacement.
//! The chosen primes are returned in ascending order so the work list is
//! independent of the draw order.

use crate::error::{FilamentError, Result};
use crate::primes::primes_in_range;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How many of the primes in a range are actually evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPolicy {
    /// Evaluate every prime in the range.
    #[default]
    Full,
    /// Evaluate a uniform random subset of `size` primes. A seed makes the
    /// draw reproducible; without one each call draws from entropy.
    RandomSubset { size: usize, seed: Option<u64> },
}

impl SamplingPolicy {
    /// Policy for an optional sample size: unset means full enumeration.
    pub fn from_sample_size(sample_size: Option<usize>, seed: Option<u64>) -> Self {
        match sample_size {
            None => SamplingPolicy::Full,
            Some(size) => SamplingPolicy::RandomSubset { size, seed },
        }
    }

    pub fn sample_size(&self) -> Option<usize> {
        match self {
            SamplingPolicy::Full => None,
            SamplingPolicy::RandomSubset { size, .. } => Some(*size),
        }
    }
}

/// A closed interval `[start, end]` of integers plus a sampling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub name: String,
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub policy: SamplingPolicy,
}

impl RangeSpec {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            name: format!("{}-{}", start, end),
            start,
            end,
            policy: SamplingPolicy::Full,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sample at most `size` primes, keeping any seed already set.
    pub fn sampled(mut self, size: usize) -> Self {
        let seed = match self.policy {
            SamplingPolicy::RandomSubset { seed, .. } => seed,
            SamplingPolicy::Full => None,
        };
        self.policy = SamplingPolicy::RandomSubset { size, seed };
        self
    }

    /// Fix the seed of a random-subset policy. No effect on `Full`.
    pub fn seeded(mut self, seed: u64) -> Self {
        if let SamplingPolicy::RandomSubset { size, .. } = self.policy {
            self.policy = SamplingPolicy::RandomSubset {
                size,
                seed: Some(seed),
            };
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(FilamentError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Select the primes of `universe` that the range's policy says to evaluate.
///
/// `universe` must be ascending (as produced by [`crate::primes::primes_up_to`]).
/// Fails with [`FilamentError::EmptyRange`] if no prime lies in the range.
pub fn select(spec: &RangeSpec, universe: &[u64]) -> Result<Vec<u64>> {
    select_lazy(spec, universe, || match spec.policy {
        SamplingPolicy::RandomSubset { seed: Some(seed), .. } => StdRng::seed_from_u64(seed),
        _ => StdRng::from_entropy(),
    })
}

/// Like [`select`], drawing from a caller-owned random source. The seed in
/// the policy is ignored.
pub fn select_with_rng(spec: &RangeSpec, universe: &[u64], rng: &mut impl Rng) -> Result<Vec<u64>> {
    select_lazy(spec, universe, || rng)
}

/// The random source is only built when a strict subset is drawn.
fn select_lazy<R: Rng>(
    spec: &RangeSpec,
    universe: &[u64],
    make_rng: impl FnOnce() -> R,
) -> Result<Vec<u64>> {
    spec.validate()?;
    let in_range = primes_in_range(universe, spec.start, spec.end);
    if in_range.is_empty() {
        return Err(FilamentError::EmptyRange {
            start: spec.start,
            end: spec.end,
        });
    }

    match spec.policy {
        SamplingPolicy::RandomSubset { size, .. } if size < in_range.len() => {
            let mut rng = make_rng();
            let mut indices = rand::seq::index::sample(&mut rng, in_range.len(), size).into_vec();
            indices.sort_unstable();
            Ok(indices.into_iter().map(|i| in_range[i]).collect())
        }
        _ => Ok(in_range.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::primes_up_to;

    #[test]
    fn test_full_enumeration() {
        let universe = primes_up_to(100);
        let spec = RangeSpec::new(10, 30);
        assert_eq!(select(&spec, &universe).unwrap(), vec![11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_oversized_sample_is_full() {
        let universe = primes_up_to(100);
        let spec = RangeSpec::new(2, 100).sampled(1000);
        assert_eq!(select(&spec, &universe).unwrap(), universe);
        let exact = RangeSpec::new(2, 100).sampled(25);
        assert_eq!(select(&exact, &universe).unwrap(), universe);
    }

    #[test]
    fn test_subset_size_and_membership() {
        let universe = primes_up_to(10_000);
        let spec = RangeSpec::new(1000, 5000).sampled(100).seeded(7);
        let chosen = select(&spec, &universe).unwrap();
        assert_eq!(chosen.len(), 100);
        assert!(chosen.windows(2).all(|w| w[0] < w[1]), "subset must be ascending and distinct");
        assert!(chosen.iter().all(|p| (1000..=5000).contains(p) && universe.contains(p)));
    }

    #[test]
    fn test_seeded_subset_reproducible() {
        let universe = primes_up_to(20_000);
        let spec = RangeSpec::new(5000, 20_000).sampled(50).seeded(12345);
        assert_eq!(select(&spec, &universe).unwrap(), select(&spec, &universe).unwrap());
    }

    #[test]
    fn test_no_rng_for_deterministic_selection() {
        let universe = primes_up_to(100);
        let never = || -> StdRng { panic!("random source built for a deterministic selection") };
        let full = RangeSpec::new(2, 100);
        assert_eq!(select_lazy(&full, &universe, never).unwrap().len(), 25);
        let oversized = RangeSpec::new(2, 100).sampled(25);
        assert_eq!(select_lazy(&oversized, &universe, never).unwrap().len(), 25);
    }

    #[test]
    fn test_empty_range() {
        let universe = primes_up_to(100);
        match select(&RangeSpec::new(24, 28), &universe) {
            Err(FilamentError::EmptyRange { start: 24, end: 28 }) => {}
            other => panic!("expected EmptyRange, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_range() {
        let universe = primes_up_to(100);
        assert!(matches!(
            select(&RangeSpec::new(50, 10), &universe),
            Err(FilamentError::InvalidRange { start: 50, end: 10 })
        ));
    }

    #[test]
    fn test_policy_from_sample_size() {
        assert_eq!(SamplingPolicy::from_sample_size(None, Some(1)), SamplingPolicy::Full);
        assert_eq!(
            SamplingPolicy::from_sample_size(Some(10), None),
            SamplingPolicy::RandomSubset { size: 10, seed: None }
        );
        assert_eq!(RangeSpec::new(1, 2).seeded(3).policy, SamplingPolicy::Full);
    }
}
