#![deny(warnings)]

//! Core domain models and invariants for Orbital Garden.
//!
//! This crate defines the serializable simulation state shared by the rules,
//! the runtime and any front end, together with the static resource range
//! table and configuration validation.

mod config;
mod events;
mod phase;
mod resource;
mod state;

pub use config::{validate_config, SimConfig};
pub use events::{ActiveEvent, EventDef, EventKind, EventLog, LogEntry, LogMessage};
pub use phase::{Difficulty, GamePhase, GrowthStage};
pub use resource::{Band, HealthRange, ResourceId, Resources, StressLevel};
pub use state::{
    CommandOutcome, Direction, RejectReason, ResourceCommand, SimulationState,
};

use thiserror::Error;

/// Validation errors for configuration and externally supplied values.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Tick lengths must be at least one millisecond.
    #[error("tick length must be > 0 ms")]
    ZeroTickLength,
    /// An orbit must span a whole number of ticks.
    #[error("orbit duration {orbit_secs}s is not a multiple of the {tick_millis}ms tick")]
    OrbitNotAligned { orbit_secs: u32, tick_millis: u32 },
    #[error("time limit must be > 0 seconds")]
    NonPositiveTimeLimit,
    /// Event chances are probabilities.
    #[error("probability {0} is outside [0,1]")]
    ProbabilityOutOfRange(f64),
    #[error("non-finite numeric value encountered")]
    NonFinite,
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("missing value for resource {0}")]
    MissingResource(ResourceId),
    #[error("{id} value {value} is outside its valid range")]
    ResourceOutOfRange { id: ResourceId, value: f64 },
}
