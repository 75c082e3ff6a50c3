//! Next-prime prediction from a logarithmic gap estimate.
//!
//! The search window after a prime `p` is `[p + 1, p + ⌊3·ln p⌋ + 20]`. The
//! first prime found there is the prediction, and its confidence depends on
//! whether it passes the balance and frequency checks.

use crate::error::{FilamentError, Result};
use crate::primes::{is_prime_miller_rabin, sieve_window};
use crate::properties::PropertyEvaluator;
use serde::Serialize;

const CONFIDENCE_VALID: f64 = 95.0;
const CONFIDENCE_INVALID: f64 = 70.0;
const CONFIDENCE_NOT_FOUND: f64 = 30.0;
const GAP_ACCURACY_NOT_FOUND: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextPrimePrediction {
    pub last_known_prime: u64,
    pub predicted_prime: u64,
    pub confidence: f64,
    /// ln(last_known_prime).
    pub estimated_gap: f64,
    pub actual_gap: u64,
    pub gap_accuracy: f64,
    pub search_start: u64,
    pub search_end: u64,
    /// Every prime in the search window, ascending.
    pub candidates: Vec<u64>,
    /// Balance factor of the predicted prime; 0 when the window was empty.
    pub balance_factor: f64,
    /// Frequency error percentage of the predicted prime; 0 when the window was empty.
    pub frequency_error: f64,
}

/// Predict the prime following `last_known` with the default evaluator.
pub fn predict_next_prime(last_known: u64) -> Result<NextPrimePrediction> {
    predict_next_prime_with(&PropertyEvaluator::default(), last_known)
}

pub fn predict_next_prime_with(
    evaluator: &PropertyEvaluator,
    last_known: u64,
) -> Result<NextPrimePrediction> {
    if !is_prime_miller_rabin(last_known) {
        return Err(FilamentError::InvalidInput(last_known));
    }

    let estimated_gap = (last_known as f64).ln();
    let search_start = last_known + 1;
    let search_end = last_known + (estimated_gap * 3.0) as u64 + 20;

    let mask = sieve_window(search_start, search_end);
    let candidates: Vec<u64> = (search_start..=search_end)
        .zip(mask)
        .filter_map(|(n, prime)| prime.then_some(n))
        .collect();

    let Some(&predicted_prime) = candidates.first() else {
        let gap = estimated_gap as u64;
        return Ok(NextPrimePrediction {
            last_known_prime: last_known,
            predicted_prime: last_known + gap,
            confidence: CONFIDENCE_NOT_FOUND,
            estimated_gap,
            actual_gap: gap,
            gap_accuracy: GAP_ACCURACY_NOT_FOUND,
            search_start,
            search_end,
            candidates,
            balance_factor: 0.0,
            frequency_error: 0.0,
        });
    };

    let props = evaluator.evaluate(predicted_prime)?;
    let confidence = if props.balance_factor == 1.0 && props.flags.freq_valid {
        CONFIDENCE_VALID
    } else {
        CONFIDENCE_INVALID
    };
    let actual_gap = predicted_prime - last_known;
    let gap_accuracy = (1.0 - (actual_gap as f64 - estimated_gap).abs() / estimated_gap) * 100.0;

    Ok(NextPrimePrediction {
        last_known_prime: last_known,
        predicted_prime,
        confidence,
        estimated_gap,
        actual_gap,
        gap_accuracy,
        search_start,
        search_end,
        candidates,
        balance_factor: props.balance_factor,
        frequency_error: props.frequency_error,
    })
}
