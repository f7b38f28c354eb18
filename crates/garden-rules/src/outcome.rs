//! Win/loss judgement and the end-of-mission report.

use garden_core::{
    Difficulty, GamePhase, GrowthStage, ResourceId, SimConfig, SimulationState, StressLevel,
};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Decide whether the mission ended on this tick. Health depletion wins over
/// time expiry. Only a `Playing` state can conclude.
pub fn judge(state: &mut SimulationState, cfg: &SimConfig) -> Option<GamePhase> {
    if !state.is_playing() {
        return None;
    }
    let verdict = if state.plant_health <= 0.0 {
        GamePhase::Lost
    } else if state.elapsed_time >= cfg.time_limit() {
        if state.growth_stage.is_final() {
            GamePhase::Won
        } else {
            GamePhase::Lost
        }
    } else {
        return None;
    };
    state.game_phase = verdict;
    info!(
        phase = %verdict,
        t = state.elapsed_time,
        health = state.plant_health,
        stage = %state.growth_stage,
        "mission concluded"
    );
    Some(verdict)
}

/// One cause contributing to a lost mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    ResourceCritical { resource: ResourceId },
    HealthDepleted,
    TimeExpired,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ResourceCritical { resource } => {
                write!(f, "{resource} reached a critical level; keep it inside its optimal range")
            }
            FailureReason::HealthDepleted => f.write_str("plant health dropped to zero"),
            FailureReason::TimeExpired => {
                f.write_str("time ran out before the plant reached flowering")
            }
        }
    }
}

/// End-screen summary of a finished mission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub phase: GamePhase,
    pub reasons: Vec<FailureReason>,
    pub elapsed_time: f64,
    pub final_health: f64,
    pub stage_reached: GrowthStage,
    pub growth_progress: f64,
    pub orbits_completed: u32,
    pub difficulty: Difficulty,
}

impl OutcomeReport {
    pub fn is_win(&self) -> bool {
        self.phase == GamePhase::Won
    }
}

/// Build the report for a terminal state; `None` while the mission runs.
pub fn report(state: &SimulationState, cfg: &SimConfig) -> Option<OutcomeReport> {
    if !state.game_phase.is_terminal() {
        return None;
    }
    let mut reasons = Vec::new();
    if state.game_phase == GamePhase::Lost {
        reasons.extend(
            state
                .stress_factors
                .iter()
                .filter(|(_, level)| **level == StressLevel::Critical)
                .map(|(id, _)| FailureReason::ResourceCritical { resource: *id }),
        );
        if state.plant_health <= 0.0 {
            reasons.push(FailureReason::HealthDepleted);
        }
        if state.elapsed_time >= cfg.time_limit() && !state.growth_stage.is_final() {
            reasons.push(FailureReason::TimeExpired);
        }
    }
    Some(OutcomeReport {
        phase: state.game_phase,
        reasons,
        elapsed_time: state.elapsed_time,
        final_health: state.plant_health,
        stage_reached: state.growth_stage,
        growth_progress: state.growth_progress,
        orbits_completed: state.orbit_count,
        difficulty: state.difficulty,
    })
}
