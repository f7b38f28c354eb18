//! Health scoring against the optimal/critical range table.

use garden_core::{Difficulty, ResourceId, Resources, SimulationState, StressLevel};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CRITICAL_PENALTY: f64 = 0.5;
pub const WARNING_PENALTY: f64 = 0.1;
pub const OPTIMAL_RECOVERY: f64 = 0.05;
/// Hard mode: energy below this floor hurts the plant.
pub const ENERGY_FLOOR: f64 = 20.0;
pub const ENERGY_PENALTY: f64 = 0.3;

/// Result of scoring one set of resource readings.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub delta: f64,
    pub stress: BTreeMap<ResourceId, StressLevel>,
}

/// Score `resources` for `difficulty` without touching any state.
pub fn assess(resources: &Resources, difficulty: Difficulty) -> Assessment {
    let mut out = Assessment::default();
    for id in ResourceId::ALL.into_iter().filter(|id| id.is_scored(difficulty)) {
        match id.status(resources[id]) {
            Some(StressLevel::Critical) => {
                out.delta -= CRITICAL_PENALTY;
                out.stress.insert(id, StressLevel::Critical);
            }
            Some(StressLevel::Warning) => {
                out.delta -= WARNING_PENALTY;
                out.stress.insert(id, StressLevel::Warning);
            }
            None => out.delta += OPTIMAL_RECOVERY,
        }
    }
    if difficulty == Difficulty::Hard && resources[ResourceId::Energy] < ENERGY_FLOOR {
        out.delta -= ENERGY_PENALTY;
        out.stress.insert(ResourceId::Energy, StressLevel::Critical);
    }
    out
}

/// Apply the summed health delta once and replace the stress factors.
/// Returns the delta.
pub fn evaluate_health(state: &mut SimulationState) -> f64 {
    let Assessment { delta, stress } = assess(&state.resources, state.difficulty);
    state.plant_health = (state.plant_health + delta).clamp(0.0, 100.0);
    state.stress_factors = stress;
    delta
}
