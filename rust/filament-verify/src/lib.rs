//! # Filament Verify
//!
//! Bulk numeric verification of the filament relations on primes:
//!
//! - `p/π = 4p · (1/(4π))` (frequency relation, a floating-point equality test)
//! - `p + (−p) = 0` (balance)
//! - `(4/3)π · p > 0` (4-component volume at unit radius)
//!
//! over prime ranges of widely varying size, plus a nearest-prime
//! correspondence against zeta-zero ordinates.
//!
//! Primes come from one sieve ([`primes::primes_up_to`]); ranges are either
//! enumerated in full or uniformly subsampled ([`sampling`]) so that the cost
//! per range stays bounded as ranges grow geometrically.

pub mod aggregate;
pub mod constants;
pub mod correspondence;
pub mod error;
pub mod prediction;
pub mod primes;
pub mod properties;
pub mod resonance;
pub mod sampling;
pub mod sweep;

pub use aggregate::{aggregate, aggregate_with, ErrorStats, RangeResult};
pub use constants::FilamentConstants;
pub use correspondence::{
    match_reference, CorrespondenceMatcher, CorrespondenceResult, Transform, KNOWN_ZETA_ZEROS,
};
pub use error::{FilamentError, Result};
pub use primes::{is_prime, primes_up_to};
pub use properties::{evaluate, PropertyEvaluator, PropertyResult};
pub use sampling::{select, RangeSpec, SamplingPolicy};
pub use sweep::{run_sweep, SweepConfig, SweepReport};
