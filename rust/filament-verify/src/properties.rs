//! Per-prime property evaluation.
//!
//! Every quantity is a closed-form function of the prime `p` and the
//! constants in [`FilamentConstants`]:
//!
//! - calculated frequency `p/π` and theoretical frequency `4·p·f0`
//! - balance value `p + (−p)` and its balance factor
//! - the orthogonal root pair `(√p, √p)`
//! - the 4-component volume `(4/3)πr³ · p` at unit radius
//! - the resonance figures of [`crate::resonance`]
//!
//! `p/π` and `4·p·(1/(4π))` are the same quantity written two ways, so the
//! frequency flag is a floating-point equality test: it fails only when the
//! two evaluation orders drift apart by more than the relative tolerance.

use crate::constants::FilamentConstants;
use crate::error::{FilamentError, Result};
use crate::primes::is_prime_miller_rabin;
use crate::resonance::ResonanceProperties;
use serde::Serialize;

/// Capacitive and inductive roots of a prime. Both equal √p.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootPair {
    pub capacitive: f64,
    pub inductive: f64,
}

/// Three spatial components at fixed radius plus the prime as temporal extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FourDimVolume {
    pub radius: f64,
    pub surface_area: f64,
    pub unit_volume: f64,
    pub temporal_dimension: f64,
    pub four_d_volume: f64,
}

/// Validity flags for one evaluation. `overall_valid` is always the
/// conjunction of the three per-quantity flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityFlags {
    pub freq_valid: bool,
    pub balance_valid: bool,
    pub volume_valid: bool,
    pub overall_valid: bool,
}

impl ValidityFlags {
    pub fn new(freq_valid: bool, balance_valid: bool, volume_valid: bool) -> Self {
        Self {
            freq_valid,
            balance_valid,
            volume_valid,
            overall_valid: freq_valid && balance_valid && volume_valid,
        }
    }
}

/// Outcome of evaluating a single prime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyResult {
    pub prime: u64,
    pub calculated_frequency: f64,
    pub theoretical_frequency: f64,
    /// |calculated − theoretical| / calculated · 100.
    pub frequency_error: f64,
    /// Exact integer `p + (−p)`.
    pub balance_value: i128,
    pub balance_factor: f64,
    pub roots: RootPair,
    pub volume: FourDimVolume,
    pub resonance: ResonanceProperties,
    /// h · f / V4.
    pub energy_density: f64,
    pub flags: ValidityFlags,
}

impl PropertyResult {
    pub fn overall_valid(&self) -> bool {
        self.flags.overall_valid
    }
}

/// Evaluates the property bundle of a prime against a fixed set of constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEvaluator {
    constants: FilamentConstants,
}

impl PropertyEvaluator {
    pub fn new(constants: FilamentConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &FilamentConstants {
        &self.constants
    }

    /// Evaluate all derived quantities and flags for `p`.
    ///
    /// Fails with [`FilamentError::InvalidInput`] if `p` is not prime.
    pub fn evaluate(&self, p: u64) -> Result<PropertyResult> {
        if !is_prime_miller_rabin(p) {
            return Err(FilamentError::InvalidInput(p));
        }
        Ok(self.evaluate_unchecked(p))
    }

    /// Evaluate a value the caller has already verified to be prime.
    pub(crate) fn evaluate_unchecked(&self, p: u64) -> PropertyResult {
        let c = &self.constants;
        let pf = p as f64;

        let calculated_frequency = pf / c.pi;
        let theoretical_frequency = 4.0 * pf * c.fundamental_frequency;
        let relative_error =
            (calculated_frequency - theoretical_frequency).abs() / calculated_frequency;
        let frequency_error = relative_error * 100.0;

        let signed = i128::from(p);
        let balance_value = signed + (-signed);
        let balance_factor = if balance_value == 0 {
            1.0
        } else {
            1.0 / (1.0 + balance_value.unsigned_abs() as f64)
        };

        let root = pf.sqrt();
        let roots = RootPair {
            capacitive: root,
            inductive: root,
        };

        let unit_volume = c.unit_volume();
        let volume = FourDimVolume {
            radius: c.unit_radius,
            surface_area: c.surface_area(),
            unit_volume,
            temporal_dimension: pf,
            four_d_volume: unit_volume * pf,
        };

        let energy_density = if volume.four_d_volume > 0.0 {
            c.planck_constant * calculated_frequency / volume.four_d_volume
        } else {
            0.0
        };

        let flags = ValidityFlags::new(
            relative_error < c.frequency_tolerance,
            balance_factor == 1.0,
            volume.four_d_volume > 0.0,
        );

        PropertyResult {
            prime: p,
            calculated_frequency,
            theoretical_frequency,
            frequency_error,
            balance_value,
            balance_factor,
            roots,
            volume,
            resonance: ResonanceProperties::compute(p, c),
            energy_density,
            flags,
        }
    }
}

/// Evaluate `p` with the default constants.
pub fn evaluate(p: u64) -> Result<PropertyResult> {
    PropertyEvaluator::default().evaluate(p)
}
