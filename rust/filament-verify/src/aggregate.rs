//! Range aggregation: evaluate the selected primes of a range and reduce
//! them to range-level statistics.

use crate::error::{FilamentError, Result};
use crate::primes::{first_composite, primes_in_range};
use crate::properties::{PropertyEvaluator, PropertyResult};
use crate::sampling::{select, select_with_rng, RangeSpec};
use log::{info, warn};
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

/// Mean, extremes and population standard deviation of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ErrorStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl ErrorStats {
    /// Statistics over `values`; all zero when `values` is empty.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
        }
    }
}

/// Aggregate outcome of testing one range.
#[derive(Debug, Clone, Serialize)]
pub struct RangeResult {
    pub name: String,
    pub start: u64,
    pub end: u64,
    pub total_in_range: usize,
    pub tested: usize,
    pub valid: usize,
    /// Percentage of tested primes with `overall_valid`; 0 when nothing was tested.
    pub success_rate: f64,
    /// Statistics of the frequency error percentage.
    pub freq_error: ErrorStats,
    /// Wall-clock seconds spent in the evaluation phase.
    pub duration_secs: f64,
    pub results: Vec<PropertyResult>,
}

impl RangeResult {
    /// Primes that failed at least one validity flag.
    pub fn failed_primes(&self) -> Vec<u64> {
        self.results
            .iter()
            .filter(|r| !r.overall_valid())
            .map(|r| r.prime)
            .collect()
    }
}

/// Aggregate a range with the default evaluator.
pub fn aggregate(spec: &RangeSpec, universe: &[u64]) -> Result<RangeResult> {
    let worklist = select(spec, universe)?;
    reduce(&PropertyEvaluator::default(), spec, universe, worklist)
}

/// Aggregate a range with an explicit evaluator and random source.
pub fn aggregate_with(
    evaluator: &PropertyEvaluator,
    spec: &RangeSpec,
    universe: &[u64],
    rng: &mut impl Rng,
) -> Result<RangeResult> {
    let worklist = select_with_rng(spec, universe, rng)?;
    reduce(evaluator, spec, universe, worklist)
}

fn reduce(
    evaluator: &PropertyEvaluator,
    spec: &RangeSpec,
    universe: &[u64],
    worklist: Vec<u64>,
) -> Result<RangeResult> {
    let total_in_range = primes_in_range(universe, spec.start, spec.end).len();

    let start = Instant::now();
    // Fail fast: a non-prime in the work list aborts the whole range.
    if let Some(n) = first_composite(&worklist) {
        return Err(FilamentError::InvalidInput(n));
    }
    let results: Vec<PropertyResult> = worklist
        .iter()
        .map(|&p| evaluator.evaluate_unchecked(p))
        .collect();
    let duration_secs = start.elapsed().as_secs_f64();

    let tested = results.len();
    let valid = results.iter().filter(|r| r.overall_valid()).count();
    let success_rate = if tested > 0 {
        100.0 * valid as f64 / tested as f64
    } else {
        0.0
    };
    let errors: Vec<f64> = results.iter().map(|r| r.frequency_error).collect();
    let freq_error = ErrorStats::from_values(&errors);

    info!(
        "range {} [{}, {}]: {}/{} valid of {} in range, mean error {:.2e}%",
        spec.name, spec.start, spec.end, valid, tested, total_in_range, freq_error.mean
    );
    if tested > 0 && valid < tested {
        warn!("range {}: {} primes failed validation", spec.name, tested - valid);
    }

    Ok(RangeResult {
        name: spec.name.clone(),
        start: spec.start,
        end: spec.end,
        total_in_range,
        tested,
        valid,
        success_rate,
        freq_error,
        duration_secs,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::primes_up_to;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_aggregate_first_hundred() {
        let universe = primes_up_to(100);
        let r = aggregate(&RangeSpec::new(2, 100), &universe).unwrap();
        assert_eq!(r.total_in_range, 25);
        assert_eq!(r.tested, 25);
        assert_eq!(r.valid, 25);
        assert_eq!(r.success_rate, 100.0);
        assert!(r.failed_primes().is_empty());
    }

    #[test]
    fn test_sampled_range_counts() {
        let universe = primes_up_to(5000);
        let spec = RangeSpec::new(1000, 5000).sampled(100).seeded(1);
        let r = aggregate(&spec, &universe).unwrap();
        assert_eq!(r.total_in_range, 501);
        assert_eq!(r.tested, 100);
        assert!(r.tested <= r.total_in_range);
    }

    #[test]
    fn test_zero_sample_reports_zero_stats() {
        let universe = primes_up_to(100);
        let spec = RangeSpec::new(2, 100).sampled(0).seeded(1);
        let r = aggregate(&spec, &universe).unwrap();
        assert_eq!(r.tested, 0);
        assert_eq!(r.success_rate, 0.0);
        assert_eq!(r.freq_error, ErrorStats::default());
    }

    #[test]
    fn test_non_prime_universe_aborts() {
        // A universe that violates the ascending-primes contract.
        let universe = vec![2u64, 3, 4, 5];
        let mut rng = StdRng::seed_from_u64(0);
        let result = aggregate_with(
            &PropertyEvaluator::default(),
            &RangeSpec::new(2, 5),
            &universe,
            &mut rng,
        );
        assert!(matches!(result, Err(FilamentError::InvalidInput(4))));
    }

    #[test]
    fn test_sparse_non_prime_aborts() {
        // Span far wider than the work list: checked value by value.
        let universe = vec![2u64, 1_000_001, 999_999_937];
        let mut rng = StdRng::seed_from_u64(0);
        let result = aggregate_with(
            &PropertyEvaluator::default(),
            &RangeSpec::new(2, 1_000_000_000),
            &universe,
            &mut rng,
        );
        assert!(matches!(result, Err(FilamentError::InvalidInput(1_000_001))));
    }

    #[test]
    fn test_full_range_matches_direct_evaluation() {
        let universe = primes_up_to(50_000);
        let r = aggregate(&RangeSpec::new(10_000, 50_000), &universe).unwrap();
        let evaluator = PropertyEvaluator::default();
        for result in &r.results {
            assert_eq!(*result, evaluator.evaluate(result.prime).unwrap());
        }
    }

    #[test]
    fn test_error_stats() {
        let s = ErrorStats::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!((s.std_dev - 1.118033988749895).abs() < 1e-12);
        assert_eq!(ErrorStats::from_values(&[]), ErrorStats::default());
    }
}
