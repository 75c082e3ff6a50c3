//! Fixed physical and numeric constants used by the property evaluator.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Immutable constant bundle captured by [`crate::properties::PropertyEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilamentConstants {
    pub pi: f64,
    /// Fundamental frequency f0 = 1/(4π).
    pub fundamental_frequency: f64,
    /// Effective radius of the unit sphere used for the 4-component volume.
    pub unit_radius: f64,
    /// Relative tolerance between the two frequency expressions.
    pub frequency_tolerance: f64,
    pub planck_constant: f64,
    /// Filament mass in kilograms.
    pub filament_mass: f64,
    /// Speed of light in m/s.
    pub light_speed: f64,
    /// Inductance L of the LC model; the capacitance is solved for resonance.
    pub reference_inductance: f64,
}

impl Default for FilamentConstants {
    fn default() -> Self {
        Self {
            pi: PI,
            fundamental_frequency: 1.0 / (4.0 * PI),
            unit_radius: 1.0,
            frequency_tolerance: 1e-10,
            planck_constant: 6.626_070_15e-34,
            filament_mass: 5.858_81e-52,
            light_speed: 299_792_458.0,
            reference_inductance: 1.0,
        }
    }
}

impl FilamentConstants {
    /// Surface area of the unit sphere, 4πr².
    pub fn surface_area(&self) -> f64 {
        4.0 * self.pi * self.unit_radius.powi(2)
    }

    /// Volume of the unit sphere, (4/3)πr³.
    pub fn unit_volume(&self) -> f64 {
        (4.0 / 3.0) * self.pi * self.unit_radius.powi(3)
    }
}
