//! Feasibility filtering and total-mass ranking.
//!
//! Every catalog entry is checked against the power budget, sized with the rocket equation,
//! and the survivors are ordered lightest-first. Entries that cannot fly are recorded in an
//! exclusion ledger so front-ends can explain what was dropped.

use serde::Serialize;
use select_core::numeric::round_to;
use select_propulsion::{estimate_fuel, FuelEstimate, MissionConstraints, ThrusterSpec};
use tracing::debug;

/// Decimal places kept on reported propellant mass.
pub const FUEL_DECIMALS: u32 = 3;
/// Decimal places kept on reported total mass.
pub const TOTAL_DECIMALS: u32 = 2;

/// A thruster that passed the power gate, with its mass budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedThruster {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub power_w: f64,
    pub thruster_mass_kg: f64,
    /// Rounded to [`FUEL_DECIMALS`].
    pub fuel_kg: f64,
    /// Dry + thruster + unrounded fuel, rounded to [`TOTAL_DECIMALS`].
    pub total_mass_kg: f64,
}

/// Why a catalog entry is missing from the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    PowerExceeded { power_w: f64, max_power_w: f64 },
    InfeasiblePropulsion { isp_s: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    pub name: String,
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

/// Ranked thrusters plus the ledger of dropped entries, both in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub ranked: Vec<EvaluatedThruster>,
    pub excluded: Vec<Exclusion>,
}

impl Evaluation {
    pub fn is_infeasible(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Rank the feasible thrusters of `catalog` by ascending total mass.
pub fn rank(catalog: &[ThrusterSpec], constraints: &MissionConstraints) -> Vec<EvaluatedThruster> {
    evaluate(catalog, constraints).ranked
}

/// Evaluate every catalog entry, returning the ranking and the exclusion ledger.
///
/// The power gate is applied first, so an entry failing both gates is reported as
/// [`ExclusionReason::PowerExceeded`]. Ties in total mass keep catalog order.
pub fn evaluate(catalog: &[ThrusterSpec], constraints: &MissionConstraints) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for spec in catalog {
        match evaluate_one(spec, constraints) {
            Ok(evaluated) => evaluation.ranked.push(evaluated),
            Err(reason) => {
                debug!(thruster = %spec.name, ?reason, "thruster excluded from ranking");
                evaluation.excluded.push(Exclusion {
                    name: spec.name.clone(),
                    reason,
                });
            }
        }
    }

    // Vec::sort_by is stable.
    evaluation
        .ranked
        .sort_by(|a, b| a.total_mass_kg.total_cmp(&b.total_mass_kg));
    evaluation
}

fn evaluate_one(
    spec: &ThrusterSpec,
    constraints: &MissionConstraints,
) -> Result<EvaluatedThruster, ExclusionReason> {
    if spec.power_w > constraints.max_power_w {
        return Err(ExclusionReason::PowerExceeded {
            power_w: spec.power_w,
            max_power_w: constraints.max_power_w,
        });
    }

    let fuel_kg = match estimate_fuel(constraints.dry_mass_kg, constraints.required_dv, spec.isp_s)
    {
        FuelEstimate::Finite { fuel_kg } => fuel_kg,
        FuelEstimate::InfeasiblePropulsion => {
            return Err(ExclusionReason::InfeasiblePropulsion { isp_s: spec.isp_s });
        }
    };
    let total_mass_kg = constraints.dry_mass_kg + spec.mass_kg + fuel_kg;

    Ok(EvaluatedThruster {
        name: spec.name.clone(),
        kind: spec.kind.clone(),
        power_w: spec.power_w,
        thruster_mass_kg: spec.mass_kg,
        fuel_kg: round_to(fuel_kg, FUEL_DECIMALS),
        total_mass_kg: round_to(total_mass_kg, TOTAL_DECIMALS),
    })
}
