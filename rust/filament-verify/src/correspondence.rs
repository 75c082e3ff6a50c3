//! Nearest-prime correspondence for external reference values
//! (zeta-zero ordinates by default).
//!
//! Each reference `t` is mapped through a fixed [`Transform`] to a predicted
//! real number, and the nearest candidate prime is located by binary search
//! over the ascending candidate list: O(log n) per reference.

use crate::error::{FilamentError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI, SQRT_2};
use std::fmt;

/// Ordinates of the first twenty nontrivial zeros of the Riemann zeta function.
pub const KNOWN_ZETA_ZEROS: [f64; 20] = [
    14.134725141734693790,
    21.022039638771554993,
    25.010857580145688763,
    30.424876125859513210,
    32.935061587739189691,
    37.586178158825671257,
    40.918719012147495187,
    43.327073280914999519,
    48.005150881167159727,
    49.773832477672302181,
    52.970321477714460644,
    56.446247697063246086,
    59.347044003233895969,
    60.831778524609809200,
    65.112544048081651438,
    67.079810529494905051,
    69.546401711173979984,
    72.067157674481907582,
    75.704690699083933914,
    77.144840068874800998,
];

/// Closed-form map from a reference value to a predicted prime.
///
/// These are curve fits with no derivation behind them; only their
/// determinism is relied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// `(t/π) · √2 · cos(π/4)`.
    #[default]
    Orthogonal,
    /// `(t/π) · √2 · cos(π/4) · (1 + 0.1 · log2 t)`. Undefined for `t <= 0`.
    LogCorrected,
}

impl Transform {
    pub fn apply(&self, reference: f64) -> f64 {
        let orthogonal = (reference / PI) * SQRT_2 * FRAC_PI_4.cos();
        match self {
            Transform::Orthogonal => orthogonal,
            Transform::LogCorrected => orthogonal * (1.0 + 0.1 * reference.log2()),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Orthogonal => write!(f, "orthogonal"),
            Transform::LogCorrected => write!(f, "log-corrected"),
        }
    }
}

/// Match of one reference value against a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrespondenceResult {
    pub reference: f64,
    /// `t / (2π)`.
    pub reference_frequency: f64,
    pub predicted: f64,
    pub nearest: u64,
    /// `(1 − |nearest − predicted| / nearest) · 100`, clamped to [0, 100].
    pub closeness: f64,
    pub transform: Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CorrespondenceMatcher {
    pub transform: Transform,
}

impl CorrespondenceMatcher {
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    /// Match a single reference against ascending `candidates`.
    pub fn match_reference(&self, reference: f64, candidates: &[u64]) -> Result<CorrespondenceResult> {
        if candidates.is_empty() {
            return Err(FilamentError::EmptyCandidates);
        }
        let predicted = self.transform.apply(reference);
        if !predicted.is_finite() {
            return Err(FilamentError::InvalidReference(reference));
        }
        let nearest = nearest_candidate(candidates, predicted);
        Ok(CorrespondenceResult {
            reference,
            reference_frequency: reference / (2.0 * PI),
            predicted,
            nearest,
            closeness: closeness(nearest, predicted),
            transform: self.transform,
        })
    }

    /// Match every reference in order. Fails on the first error.
    pub fn match_all(&self, references: &[f64], candidates: &[u64]) -> Result<Vec<CorrespondenceResult>> {
        references
            .iter()
            .map(|&t| self.match_reference(t, candidates))
            .collect()
    }
}

/// Match with the default transform.
pub fn match_reference(reference: f64, candidates: &[u64]) -> Result<CorrespondenceResult> {
    CorrespondenceMatcher::default().match_reference(reference, candidates)
}

/// Candidate closest to `target`; ties go to the smaller candidate.
fn nearest_candidate(candidates: &[u64], target: f64) -> u64 {
    let idx = candidates.partition_point(|&c| (c as f64) < target);
    if idx == 0 {
        return candidates[0];
    }
    if idx == candidates.len() {
        return candidates[idx - 1];
    }
    let lower = candidates[idx - 1];
    let upper = candidates[idx];
    if target - lower as f64 <= upper as f64 - target {
        lower
    } else {
        upper
    }
}

fn closeness(nearest: u64, predicted: f64) -> f64 {
    let n = nearest as f64;
    let raw = (1.0 - (n - predicted).abs() / n) * 100.0;
    if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Mean closeness over a batch of matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrespondenceSummary {
    pub matched: usize,
    pub mean_closeness: f64,
}

impl CorrespondenceSummary {
    pub fn from_results(results: &[CorrespondenceResult]) -> Self {
        let mean_closeness = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.closeness).sum::<f64>() / results.len() as f64
        };
        Self {
            matched: results.len(),
            mean_closeness,
        }
    }
}

/// Index-aligned comparison of a reference's frequency `t/(2π)` with the
/// prime frequency `p/π`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyPair {
    pub reference: f64,
    pub prime: u64,
    pub reference_frequency: f64,
    pub prime_frequency: f64,
    pub ratio: f64,
    /// `|ratio − 1| · 100`.
    pub error_percent: f64,
}

/// Pair the i-th reference with the i-th prime, for `min(len)` pairs.
pub fn pair_frequencies(references: &[f64], primes: &[u64]) -> Vec<FrequencyPair> {
    references
        .iter()
        .zip(primes)
        .map(|(&t, &p)| {
            let reference_frequency = t / (2.0 * PI);
            let prime_frequency = p as f64 / PI;
            let ratio = reference_frequency / prime_frequency;
            FrequencyPair {
                reference: t,
                prime: p,
                reference_frequency,
                prime_frequency,
                ratio,
                error_percent: (ratio - 1.0).abs() * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_PRIMES: [u64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    #[test]
    fn test_first_zero_orthogonal() {
        let r = match_reference(14.134725141734694, &FIRST_PRIMES).unwrap();
        assert!((r.predicted - 4.499223).abs() < 1e-5);
        assert_eq!(r.nearest, 5);
        assert!((r.closeness - 89.984).abs() < 1e-2);
        assert!((r.reference_frequency - 2.249611).abs() < 1e-5);
    }

    #[test]
    fn test_first_zero_log_corrected() {
        let m = CorrespondenceMatcher::new(Transform::LogCorrected);
        let r = m.match_reference(14.134725141734694, &FIRST_PRIMES).unwrap();
        assert_eq!(r.nearest, 7);
        assert!(r.closeness > 85.0 && r.closeness <= 100.0);
    }

    #[test]
    fn test_tie_breaks_to_smaller() {
        assert_eq!(nearest_candidate(&[3, 5], 4.0), 3);
        assert_eq!(nearest_candidate(&[3, 5], 4.0001), 5);
    }

    #[test]
    fn test_outside_candidate_span() {
        assert_eq!(nearest_candidate(&FIRST_PRIMES, -10.0), 2);
        assert_eq!(nearest_candidate(&FIRST_PRIMES, 1e9), 47);
        assert_eq!(nearest_candidate(&[11], 500.0), 11);
    }

    #[test]
    fn test_closeness_clamped() {
        // Far below the smallest candidate.
        let r = match_reference(-1000.0, &FIRST_PRIMES).unwrap();
        assert_eq!(r.nearest, 2);
        assert_eq!(r.closeness, 0.0);
        // Exact hit.
        assert_eq!(closeness(7, 7.0), 100.0);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(matches!(match_reference(14.1, &[]), Err(FilamentError::EmptyCandidates)));
    }

    #[test]
    fn test_log_transform_rejects_non_positive() {
        let m = CorrespondenceMatcher::new(Transform::LogCorrected);
        assert!(matches!(
            m.match_reference(0.0, &FIRST_PRIMES),
            Err(FilamentError::InvalidReference(_))
        ));
        assert!(matches!(
            m.match_reference(f64::NAN, &FIRST_PRIMES),
            Err(FilamentError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_summary_and_pairs() {
        let results = CorrespondenceMatcher::default()
            .match_all(&KNOWN_ZETA_ZEROS[..5], &FIRST_PRIMES)
            .unwrap();
        let summary = CorrespondenceSummary::from_results(&results);
        assert_eq!(summary.matched, 5);
        assert!(summary.mean_closeness > 0.0 && summary.mean_closeness <= 100.0);
        assert_eq!(CorrespondenceSummary::from_results(&[]).mean_closeness, 0.0);

        let pairs = pair_frequencies(&KNOWN_ZETA_ZEROS, &FIRST_PRIMES[..3]);
        assert_eq!(pairs.len(), 3);
        // t/(2π) over p/π = t/(2p)
        assert!((pairs[0].ratio - KNOWN_ZETA_ZEROS[0] / 4.0).abs() < 1e-12);
    }
}
