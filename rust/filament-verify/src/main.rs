//! Filament verification driver.
//!
//! Usage:
//!   filament-verify --mode=sweep    [--config=sweep.json] [--seed=N] [--sequential] [--out=path]
//!   filament-verify --mode=match    [--limit=10000] [--transform=orthogonal|log] [--out=path]
//!   filament-verify --mode=predict  [--prime=47]
//!   filament-verify --mode=evaluate [--prime=7]
//!
//! Set RUST_LOG=info for per-range progress.

use filament_verify::correspondence::{pair_frequencies, CorrespondenceSummary};
use filament_verify::prediction::predict_next_prime;
use filament_verify::sweep::print_summary;
use filament_verify::{
    evaluate, primes_up_to, run_sweep, CorrespondenceMatcher, SweepConfig, Transform,
    KNOWN_ZETA_ZEROS,
};
use std::collections::HashMap;
use std::path::Path;

fn main() {
    env_logger::init();

    let opts = CliOptions::from_args(std::env::args().skip(1));

    let mode = opts.str_or("mode", "sweep");

    let outcome = match mode {
        "sweep" => run_sweep_mode(&opts),
        "match" => run_match_mode(&opts),
        "predict" => run_predict_mode(&opts),
        "evaluate" => run_evaluate_mode(&opts),
        other => {
            eprintln!("Unknown mode: {other}. Use --mode=sweep|match|predict|evaluate");
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_sweep_mode(opts: &CliOptions) -> filament_verify::Result<()> {
    let mut config = match opts.get("config") {
        Some(path) => SweepConfig::from_json_file(path)?,
        None => SweepConfig::default(),
    };
    config.seed = opts.u64_or("seed", config.seed);
    if opts.flag("sequential") {
        config.parallel = false;
    }

    println!("Filament sweep: {} ranges up to {}", config.ranges.len(), config.limit());
    println!("Seed: 0x{:016x}\n", config.seed);

    let report = run_sweep(&config);
    print_summary(&report);
    write_json(&report, opts.str_or("out", "data/sweep_results.json"));
    Ok(())
}

fn run_match_mode(opts: &CliOptions) -> filament_verify::Result<()> {
    let limit = opts.u64_or("limit", 10_000);
    let transform = match opts.str_or("transform", "orthogonal") {
        "log" | "log-corrected" => Transform::LogCorrected,
        _ => Transform::Orthogonal,
    };
    let candidates = primes_up_to(limit);
    let matcher = CorrespondenceMatcher::new(transform);
    let results = matcher.match_all(&KNOWN_ZETA_ZEROS, &candidates)?;

    println!("Zeta-zero correspondence ({transform}) against {} primes\n", candidates.len());
    println!("{:>22} {:>12} {:>8} {:>10}", "zero", "predicted", "nearest", "closeness");
    println!("{}", "-".repeat(56));
    for r in &results {
        println!(
            "{:>22.15} {:>12.6} {:>8} {:>9.3}%",
            r.reference, r.predicted, r.nearest, r.closeness
        );
    }
    let summary = CorrespondenceSummary::from_results(&results);
    println!("\nMean closeness: {:.3}% over {} zeros", summary.mean_closeness, summary.matched);

    println!("\nIndex-aligned frequency ratios t/(2π) : p/π");
    for pair in pair_frequencies(&KNOWN_ZETA_ZEROS, &candidates) {
        println!(
            "  t={:<10.4} p={:<4} ratio={:.4} error={:.2}%",
            pair.reference, pair.prime, pair.ratio, pair.error_percent
        );
    }

    write_json(&results, opts.str_or("out", "data/correspondence_results.json"));
    Ok(())
}

fn run_predict_mode(opts: &CliOptions) -> filament_verify::Result<()> {
    let last = opts.u64_or("prime", 47);
    let p = predict_next_prime(last)?;
    println!("Last known prime: {}", p.last_known_prime);
    println!("Search window:    [{}, {}]", p.search_start, p.search_end);
    println!("Predicted prime:  {} (gap {}, estimated {:.3})", p.predicted_prime, p.actual_gap, p.estimated_gap);
    println!("Confidence:       {:.1}%", p.confidence);
    println!("Gap accuracy:     {:.2}%", p.gap_accuracy);
    println!("Candidates:       {:?}", p.candidates);
    Ok(())
}

fn run_evaluate_mode(opts: &CliOptions) -> filament_verify::Result<()> {
    let prime = opts.u64_or("prime", 7);
    let r = evaluate(prime)?;
    match serde_json::to_string_pretty(&r) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Warning: could not serialize result: {e}"),
    }
    Ok(())
}

/// `--key=value` options; a bare `--flag` is stored with an empty value.
struct CliOptions(HashMap<String, String>);

impl CliOptions {
    fn from_args(args: impl Iterator<Item = String>) -> Self {
        let map = args
            .filter_map(|arg| {
                let kv = arg.strip_prefix("--")?;
                let (k, v) = kv.split_once('=').unwrap_or((kv, ""));
                Some((k.to_string(), v.to_string()))
            })
            .collect();
        Self(map)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn flag(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Decimal or `0x`-prefixed hex.
    fn u64_or(&self, key: &str, default: u64) -> u64 {
        let Some(raw) = self.0.get(key) else {
            return default;
        };
        let parsed = match raw.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => raw.parse(),
        };
        parsed.unwrap_or_else(|_| {
            eprintln!("Warning: ignoring --{key}={raw}, using {default}");
            default
        })
    }
}

/// Persist `value` as pretty JSON; failures are reported, not fatal.
fn write_json<T: serde::Serialize>(value: &T, path: &str) {
    let path = Path::new(path);
    let written = serde_json::to_string_pretty(value)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
            }
            std::fs::write(path, json).map_err(|e| e.to_string())
        });
    match written {
        Ok(()) => println!("\nResults written to {}", path.display()),
        Err(e) => eprintln!("Warning: could not write {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> CliOptions {
        CliOptions::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_options_values_and_flags() {
        let opts = options(&["--mode=match", "--sequential", "stray", "--limit=500"]);
        assert_eq!(opts.str_or("mode", "sweep"), "match");
        assert!(opts.flag("sequential"));
        assert!(!opts.flag("stray"));
        assert_eq!(opts.u64_or("limit", 10), 500);
        assert_eq!(opts.str_or("out", "default.json"), "default.json");
    }

    #[test]
    fn test_u64_hex_and_fallback() {
        let opts = options(&["--seed=0xff", "--prime=seven"]);
        assert_eq!(opts.u64_or("seed", 0), 255);
        assert_eq!(opts.u64_or("prime", 7), 7);
        assert_eq!(opts.u64_or("missing", 3), 3);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&vec![2u64, 3, 5], path.to_str().unwrap());
        let back: Vec<u64> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![2, 3, 5]);
    }
}
