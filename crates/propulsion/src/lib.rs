//! Thruster descriptors, mission constraints and propellant sizing.

use serde::{Deserialize, Serialize};
use select_core::constants::G0;
use thiserror::Error;

/// One catalog entry describing an off-the-shelf thruster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterSpec {
    pub name: String,
    /// Category label, e.g. "Hall Effect" or "Chemical".
    #[serde(rename = "type")]
    pub kind: String,
    /// Electrical power draw (W).
    #[serde(rename = "power_W")]
    pub power_w: f64,
    /// Specific impulse (s). Non-positive values mark an unusable entry.
    pub isp_s: f64,
    /// Dry hardware mass (kg).
    pub mass_kg: f64,
}

/// Mission-level inputs shared by every thruster evaluated in a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionConstraints {
    /// Required delta-v (m/s). Zero or negative means no maneuver.
    pub required_dv: f64,
    /// Inclusive upper bound on thruster power draw (W).
    pub max_power_w: f64,
    /// Satellite mass excluding thruster and propellant (kg).
    pub dry_mass_kg: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConstraintError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

impl MissionConstraints {
    /// Build constraints, rejecting NaN and infinite inputs.
    pub fn new(
        required_dv: f64,
        max_power_w: f64,
        dry_mass_kg: f64,
    ) -> Result<Self, ConstraintError> {
        for (field, value) in [
            ("required_dv", required_dv),
            ("max_power_w", max_power_w),
            ("dry_mass_kg", dry_mass_kg),
        ] {
            if !value.is_finite() {
                return Err(ConstraintError::NonFinite { field, value });
            }
        }
        Ok(Self {
            required_dv,
            max_power_w,
            dry_mass_kg,
        })
    }
}

/// Propellant requirement for a single thruster, tagged so callers never sort on infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelEstimate {
    Finite { fuel_kg: f64 },
    /// Isp is non-positive; no amount of propellant achieves the maneuver.
    InfeasiblePropulsion,
}

impl FuelEstimate {
    pub fn fuel_kg(&self) -> Option<f64> {
        match self {
            FuelEstimate::Finite { fuel_kg } => Some(*fuel_kg),
            FuelEstimate::InfeasiblePropulsion => None,
        }
    }
}

/// Propellant mass from the Tsiolkovsky rocket equation.
///
/// Returns `f64::INFINITY` when `isp_s <= 0`. Values are left unrounded.
pub fn compute_fuel_mass(dry_mass_kg: f64, delta_v: f64, isp_s: f64) -> f64 {
    if isp_s <= 0.0 {
        return f64::INFINITY;
    }
    let exhaust_velocity = isp_s * G0;
    dry_mass_kg * ((delta_v / exhaust_velocity).exp() - 1.0)
}

/// Tagged counterpart of [`compute_fuel_mass`].
pub fn estimate_fuel(dry_mass_kg: f64, delta_v: f64, isp_s: f64) -> FuelEstimate {
    if isp_s <= 0.0 {
        return FuelEstimate::InfeasiblePropulsion;
    }
    FuelEstimate::Finite {
        fuel_kg: compute_fuel_mass(dry_mass_kg, delta_v, isp_s),
    }
}
