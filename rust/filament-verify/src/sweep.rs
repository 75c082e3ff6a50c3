//! Range sweep: aggregate a schedule of ranges of geometrically growing size
//! over one shared sieve, shrinking the sample as ranges grow.
//!
//! Ranges are independent, so they run on the rayon pool. Each range gets its
//! own `StdRng` derived from the sweep seed and the range index, which makes a
//! parallel sweep bit-identical to a sequential one.

use crate::aggregate::{aggregate_with, RangeResult};
use crate::error::{FilamentError, Result};
use crate::primes::primes_up_to;
use crate::properties::PropertyEvaluator;
use crate::sampling::{RangeSpec, SamplingPolicy};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Configuration for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub ranges: Vec<RangeSpec>,
    /// Base seed for ranges whose policy carries no seed of its own.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_seed() -> u64 {
    0x4e32_f11a_6e57_0001
}

fn default_parallel() -> bool {
    true
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            ranges: vec![
                RangeSpec::new(2, 50).named("tiny"),
                RangeSpec::new(50, 200).named("small"),
                RangeSpec::new(200, 1000).named("medium").sampled(100),
                RangeSpec::new(1000, 5000).named("large").sampled(100),
                RangeSpec::new(5000, 20_000).named("huge").sampled(50),
                RangeSpec::new(20_000, 100_000).named("massive").sampled(25),
            ],
            seed: default_seed(),
            parallel: default_parallel(),
        }
    }
}

impl SweepConfig {
    /// Load a sweep configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FilamentError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Largest range end, which bounds the sieve.
    pub fn limit(&self) -> u64 {
        self.ranges.iter().map(|r| r.end).max().unwrap_or(0)
    }

    fn range_seed(&self, index: usize) -> u64 {
        self.seed ^ (index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }
}

/// A range that could not be aggregated.
#[derive(Debug, Clone, Serialize)]
pub struct RangeFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OverallStatistics {
    pub total_tested: usize,
    pub total_valid: usize,
    pub overall_success_rate: f64,
    pub mean_freq_error: f64,
    pub max_freq_error: f64,
    pub total_duration_secs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub limit: u64,
    pub ranges: Vec<RangeResult>,
    pub failures: Vec<RangeFailure>,
    pub overall: OverallStatistics,
    pub failed_primes: Vec<u64>,
}

/// Run every range in `config` against a single sieve up to its largest end.
pub fn run_sweep(config: &SweepConfig) -> SweepReport {
    run_sweep_with(&PropertyEvaluator::default(), config)
}

pub fn run_sweep_with(evaluator: &PropertyEvaluator, config: &SweepConfig) -> SweepReport {
    let start = Instant::now();
    let limit = config.limit();
    let universe = primes_up_to(limit);
    info!(
        "sweep over {} ranges, {} primes up to {}",
        config.ranges.len(),
        universe.len(),
        limit
    );

    let run_one = |(index, spec): (usize, &RangeSpec)| {
        let seed = match spec.policy {
            SamplingPolicy::RandomSubset { seed: Some(seed), .. } => seed,
            _ => config.range_seed(index),
        };
        let mut rng = StdRng::seed_from_u64(seed);
        (spec.name.clone(), aggregate_with(evaluator, spec, &universe, &mut rng))
    };

    let outcomes: Vec<(String, Result<RangeResult>)> = if config.parallel {
        config.ranges.par_iter().enumerate().map(run_one).collect()
    } else {
        config.ranges.iter().enumerate().map(run_one).collect()
    };

    let mut ranges = Vec::new();
    let mut failures = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(result) => ranges.push(result),
            Err(e) => {
                warn!("range {} failed: {}", name, e);
                failures.push(RangeFailure {
                    name,
                    error: e.to_string(),
                });
            }
        }
    }

    let overall = overall_statistics(&ranges, start.elapsed().as_secs_f64());
    let failed_primes = ranges.iter().flat_map(|r| r.failed_primes()).collect();

    SweepReport {
        limit,
        ranges,
        failures,
        overall,
        failed_primes,
    }
}

fn overall_statistics(ranges: &[RangeResult], total_duration_secs: f64) -> OverallStatistics {
    let total_tested: usize = ranges.iter().map(|r| r.tested).sum();
    let total_valid: usize = ranges.iter().map(|r| r.valid).sum();
    let errors: Vec<f64> = ranges
        .iter()
        .flat_map(|r| r.results.iter().map(|p| p.frequency_error))
        .collect();

    let overall_success_rate = if total_tested > 0 {
        100.0 * total_valid as f64 / total_tested as f64
    } else {
        0.0
    };
    let mean_freq_error = if errors.is_empty() {
        0.0
    } else {
        errors.iter().sum::<f64>() / errors.len() as f64
    };
    let max_freq_error = errors.iter().copied().fold(0.0, f64::max);

    OverallStatistics {
        total_tested,
        total_valid,
        overall_success_rate,
        mean_freq_error,
        max_freq_error,
        total_duration_secs,
    }
}

/// Print a per-range table and the overall line.
pub fn print_summary(report: &SweepReport) {
    println!(
        "{:<10} {:>8} {:>8} {:>8} {:>8} {:>9} {:>12} {:>10}",
        "range", "start", "end", "primes", "tested", "success", "mean err %", "secs"
    );
    println!("{}", "-".repeat(80));
    for r in &report.ranges {
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>8} {:>8.2}% {:>12.2e} {:>10.6}",
            r.name,
            r.start,
            r.end,
            r.total_in_range,
            r.tested,
            r.success_rate,
            r.freq_error.mean,
            r.duration_secs
        );
    }
    for f in &report.failures {
        println!("{:<10} FAILED: {}", f.name, f.error);
    }
    let o = &report.overall;
    println!("{}", "-".repeat(80));
    println!(
        "Overall: {}/{} valid ({:.2}%), mean error {:.2e}%, max error {:.2e}%, {:.3}s",
        o.total_valid, o.total_tested, o.overall_success_rate, o.mean_freq_error, o.max_freq_error,
        o.total_duration_secs
    );
    if !report.failed_primes.is_empty() {
        println!("Failed primes: {:?}", report.failed_primes);
    }
}
