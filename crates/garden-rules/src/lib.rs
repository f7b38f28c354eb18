#![deny(warnings)]

//! Tick rules for Orbital Garden.
//!
//! This crate provides the pure state transitions the engine runs each step:
//! - Simulated clock and day/night toggling
//! - Passive resource drift
//! - Seeded random events with a single active slot
//! - Health scoring and growth stage advancement
//! - Outcome judgement and the end-of-mission report
//! - User commands with the hard-mode energy gate

pub mod clock;
pub mod command;
pub mod drift;
pub mod events;
pub mod growth;
pub mod health;
pub mod outcome;

pub use clock::advance_clock;
pub use command::{apply_command, ENERGY_COST};
pub use drift::apply_drift;
pub use events::{advance_event, EventChange};
pub use growth::advance_growth;
pub use health::{assess, evaluate_health, Assessment};
pub use outcome::{judge, report, FailureReason, OutcomeReport};

use garden_core::{GamePhase, SimConfig, SimulationState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Deterministic RNG used for event draws.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Advance `state` by one fixed step, in this order: clock, drift, event
/// slot, health, growth, judgement. Returns the terminal phase if the step
/// ended the mission.
///
/// The step itself does not look at the phase; callers decide whether the
/// clock is running. Only a `Playing` state can be concluded by the judge.
pub fn step<R: Rng + ?Sized>(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut R,
) -> Option<GamePhase> {
    advance_clock(state, cfg);
    apply_drift(state);
    advance_event(state, cfg, rng);
    let delta = evaluate_health(state);
    advance_growth(state);
    trace!(tick = state.tick, health = state.plant_health, delta, "tick");
    judge(state, cfg)
}
