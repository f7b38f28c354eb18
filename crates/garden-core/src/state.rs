//! The simulation aggregate and resource commands.

use crate::{
    ActiveEvent, Difficulty, EventLog, GamePhase, GrowthStage, ResourceId, Resources, StressLevel,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the engine owns. Front ends receive clones of this as snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Fixed steps taken since the game started.
    pub tick: u64,
    /// Simulated seconds, derived from `tick`.
    pub elapsed_time: f64,
    pub orbit_count: u32,
    pub is_daylight: bool,
    pub growth_stage: GrowthStage,
    pub growth_progress: f64,
    pub plant_health: f64,
    pub resources: Resources,
    pub stress_factors: BTreeMap<ResourceId, StressLevel>,
    pub active_event: Option<ActiveEvent>,
    pub event_log: EventLog,
    pub game_phase: GamePhase,
    pub difficulty: Difficulty,
}

impl SimulationState {
    /// Fresh state for a new session, parked at the menu.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            tick: 0,
            elapsed_time: 0.0,
            orbit_count: 0,
            is_daylight: true,
            growth_stage: GrowthStage::Seed,
            growth_progress: 0.0,
            plant_health: 100.0,
            resources: Resources::initial(),
            stress_factors: BTreeMap::new(),
            active_event: None,
            event_log: EventLog::default(),
            game_phase: GamePhase::Menu,
            difficulty,
        }
    }

    /// Replace every numeric field with its initial value. Phase and
    /// difficulty are left untouched.
    pub fn reset(&mut self) {
        let phase = self.game_phase;
        *self = Self::new(self.difficulty);
        self.game_phase = phase;
    }

    pub fn resource(&self, id: ResourceId) -> f64 {
        self.resources.get(id)
    }

    pub fn is_playing(&self) -> bool {
        self.game_phase == GamePhase::Playing
    }

    /// Append a log entry stamped with the current simulated time.
    pub fn log(&mut self, message: crate::LogMessage) {
        self.event_log.push(message, self.elapsed_time);
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(Difficulty::Easy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

/// A user request to move one resource.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceCommand {
    pub resource: ResourceId,
    pub direction: Direction,
    pub amount: f64,
}

impl ResourceCommand {
    pub fn increase(resource: ResourceId, amount: f64) -> Self {
        Self {
            resource,
            direction: Direction::Increase,
            amount,
        }
    }

    pub fn decrease(resource: ResourceId, amount: f64) -> Self {
        Self {
            resource,
            direction: Direction::Decrease,
            amount,
        }
    }

    /// Signed change requested.
    pub fn delta(&self) -> f64 {
        match self.direction {
            Direction::Increase => self.amount,
            Direction::Decrease => -self.amount,
        }
    }
}

/// Why a command did not mutate anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotPlaying,
    InsufficientEnergy,
    NonFiniteAmount,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied { resource: ResourceId, value: f64 },
    Rejected { reason: RejectReason },
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied { .. })
    }
}
