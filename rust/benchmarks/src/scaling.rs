//! Scaling benchmark for the verification core.
//!
//! Times the sieve and a full range sweep over geometrically growing limits,
//! with the sample size halving each step so the evaluated work stays bounded.

use filament_verify::sweep::{run_sweep, SweepConfig};
use filament_verify::{aggregate, primes_up_to, RangeSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const BASE_SAMPLE: usize = 400;

fn main() {
    println!("================================================================");
    println!("  SCALING: sieve and sweep cost across range sizes");
    println!("================================================================\n");

    let limits: Vec<u64> = (2..=7).map(|e| 10u64.pow(e)).collect();

    bench_sieve(&limits);
    bench_full_aggregate(&limits);
    bench_sweep(&limits);
}

fn bench_sieve(limits: &[u64]) {
    println!("  {:>10} {:>10} {:>12} {:>12}", "limit", "primes", "time_us", "ns/limit");
    println!("  {}", "-".repeat(48));

    for &limit in limits {
        let start = Instant::now();
        let primes = primes_up_to(limit);
        let elapsed = start.elapsed();
        println!(
            "  {:>10} {:>10} {:>12} {:>12.2}",
            limit,
            primes.len(),
            elapsed.as_micros(),
            elapsed.as_nanos() as f64 / limit as f64
        );
    }
    println!();
}

fn bench_full_aggregate(limits: &[u64]) {
    println!("  Full enumeration against the sieve:");
    println!("  {:>10} {:>12} {:>12} {:>8}", "limit", "sieve_us", "full_us", "ratio");
    println!("  {}", "-".repeat(46));

    for &limit in limits {
        let start = Instant::now();
        let universe = primes_up_to(limit);
        let sieve_us = start.elapsed().as_micros().max(1);

        let start = Instant::now();
        let outcome = aggregate(&RangeSpec::new(2, limit), &universe);
        let full_us = start.elapsed().as_micros();

        match outcome {
            Ok(_) => println!(
                "  {:>10} {:>12} {:>12} {:>7.1}x",
                limit,
                sieve_us,
                full_us,
                full_us as f64 / sieve_us as f64
            ),
            Err(e) => println!("  {:>10} FAILED: {}", limit, e),
        }
    }
    println!();
}

fn bench_sweep(limits: &[u64]) {
    let mut rng = StdRng::seed_from_u64(12345);

    let mut ranges = Vec::new();
    let mut lower = 2u64;
    let mut sample = BASE_SAMPLE;
    for &upper in limits {
        ranges.push(
            RangeSpec::new(lower, upper)
                .named(format!("1e{}", upper.ilog10()))
                .sampled(sample)
                .seeded(rng.gen()),
        );
        lower = upper;
        sample = (sample / 2).max(10);
    }

    let config = SweepConfig {
        ranges,
        seed: 12345,
        parallel: true,
    };

    let start = Instant::now();
    let report = run_sweep(&config);
    let elapsed = start.elapsed();

    println!(
        "  {:>8} {:>10} {:>10} {:>8} {:>10}",
        "range", "in_range", "tested", "success", "eval_us"
    );
    println!("  {}", "-".repeat(52));
    for r in &report.ranges {
        println!(
            "  {:>8} {:>10} {:>10} {:>7.1}% {:>10.0}",
            r.name,
            r.total_in_range,
            r.tested,
            r.success_rate,
            r.duration_secs * 1e6
        );
    }
    println!(
        "\n  Total: {} tested, {:.2}% valid, {:.3}s wall",
        report.overall.total_tested,
        report.overall.overall_success_rate,
        elapsed.as_secs_f64()
    );
}
