//! Resonance figures of a prime treated as a filament cavity with
//! frequency `f = p/π`.
//!
//! The LC model fixes the inductance and solves the capacitance for
//! resonance at `ω = f`, so `X_L` and `X_C` agree up to rounding. The
//! theoretical reactance of the cavity is `√p`.

use crate::constants::FilamentConstants;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResonanceProperties {
    /// `p/π`.
    pub frequency: f64,
    /// `f / f0`, which is `4p`.
    pub ratio_to_fundamental: f64,
    /// `c / f`.
    pub wavelength: f64,
    /// `h · f`.
    pub quantum_energy: f64,
    /// Filament mass over the unit-sphere volume.
    pub smoky_density: f64,
    pub capacitance: f64,
    pub inductive_reactance: f64,
    pub capacitive_reactance: f64,
    /// `|X_L − X_C| / max(X_L, X_C) · 100`.
    pub resonance_error: f64,
    pub theoretical_reactance: f64,
    /// `|X_L − √p| / √p · 100`.
    pub theoretical_error: f64,
}

impl ResonanceProperties {
    pub fn compute(p: u64, c: &FilamentConstants) -> Self {
        let pf = p as f64;
        let frequency = pf / c.pi;

        let omega = frequency;
        let inductance = c.reference_inductance;
        let capacitance = 1.0 / (omega * omega * inductance);
        let inductive_reactance = omega * inductance;
        let capacitive_reactance = 1.0 / (omega * capacitance);
        let resonance_error = (inductive_reactance - capacitive_reactance).abs()
            / inductive_reactance.max(capacitive_reactance)
            * 100.0;

        let theoretical_reactance = pf.sqrt();
        let theoretical_error =
            (inductive_reactance - theoretical_reactance).abs() / theoretical_reactance * 100.0;

        Self {
            frequency,
            ratio_to_fundamental: frequency / c.fundamental_frequency,
            wavelength: c.light_speed / frequency,
            quantum_energy: c.planck_constant * frequency,
            smoky_density: c.filament_mass / c.unit_volume(),
            capacitance,
            inductive_reactance,
            capacitive_reactance,
            resonance_error,
            theoretical_reactance,
            theoretical_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_frequency_figures() {
        let c = FilamentConstants::default();
        let r = ResonanceProperties::compute(7, &c);
        assert!((r.frequency - 7.0 / PI).abs() < 1e-15);
        assert!((r.ratio_to_fundamental - 28.0).abs() < 1e-12);
        assert!((r.wavelength * r.frequency - 299_792_458.0).abs() < 1e-6);
        assert!((r.quantum_energy / r.frequency - 6.626_070_15e-34).abs() < 1e-46);
    }

    #[test]
    fn test_smoky_density() {
        let r = ResonanceProperties::compute(2, &FilamentConstants::default());
        assert!((r.smoky_density - 1.398688e-52).abs() < 1e-57);
    }

    #[test]
    fn test_lc_resonance_condition() {
        let c = FilamentConstants::default();
        for p in [2u64, 3, 5, 7, 11, 7919] {
            let r = ResonanceProperties::compute(p, &c);
            assert!(r.resonance_error < 1e-9, "X_L and X_C diverge for {}", p);
        }
    }

    #[test]
    fn test_theoretical_reactance_error() {
        let r = ResonanceProperties::compute(7, &FilamentConstants::default());
        assert!((r.theoretical_reactance - 7f64.sqrt()).abs() < 1e-15);
        // X_L = 7/π against √7
        assert!((r.theoretical_error - 15.7831).abs() < 1e-3);
    }
}
