//! Simulation configuration parameters.

use crate::{Difficulty, ValidationError};
use serde::{Deserialize, Serialize};

/// Timing, outcome and randomness parameters. Every field has a default, so a
/// partial YAML file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated milliseconds added per tick (default: 100).
    pub tick_millis: u32,
    /// Wall-clock cadence of the real-time driver in milliseconds (default: 100).
    pub wall_tick_millis: u64,
    /// Seconds per day/night half orbit (default: 15).
    pub orbit_duration_secs: u32,
    /// Mission length in simulated seconds (default: 300).
    pub time_limit_secs: u32,
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    /// Per-tick chance of a new event in easy mode.
    pub event_chance_easy: f64,
    /// Per-tick chance of a new event in hard mode.
    pub event_chance_hard: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_millis: 100,
            wall_tick_millis: 100,
            orbit_duration_secs: 15,
            time_limit_secs: 300,
            rng_seed: 42,
            event_chance_easy: 0.001,
            event_chance_hard: 0.003,
        }
    }
}

impl SimConfig {
    /// Simulated seconds per tick.
    pub fn tick_seconds(&self) -> f64 {
        f64::from(self.tick_millis) / 1000.0
    }

    /// Simulated seconds after `tick` steps. Computed from integers so that
    /// whole seconds come out exact.
    pub fn elapsed_at(&self, tick: u64) -> f64 {
        (tick * u64::from(self.tick_millis)) as f64 / 1000.0
    }

    /// Number of completed orbit halves after `tick` steps.
    pub fn orbit_at(&self, tick: u64) -> u32 {
        let elapsed_ms = tick * u64::from(self.tick_millis);
        let orbit_ms = u64::from(self.orbit_duration_secs) * 1000;
        u32::try_from(elapsed_ms / orbit_ms).unwrap_or(u32::MAX)
    }

    pub fn time_limit(&self) -> f64 {
        f64::from(self.time_limit_secs)
    }

    /// Ticks in a full mission.
    pub fn ticks_per_mission(&self) -> u64 {
        u64::from(self.time_limit_secs) * 1000 / u64::from(self.tick_millis)
    }

    pub fn event_chance(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.event_chance_easy,
            Difficulty::Hard => self.event_chance_hard,
        }
    }
}

/// Validate configuration values.
pub fn validate_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.tick_millis == 0 || cfg.wall_tick_millis == 0 {
        return Err(ValidationError::ZeroTickLength);
    }
    let orbit_ms = u64::from(cfg.orbit_duration_secs) * 1000;
    if orbit_ms == 0 || orbit_ms % u64::from(cfg.tick_millis) != 0 {
        return Err(ValidationError::OrbitNotAligned {
            orbit_secs: cfg.orbit_duration_secs,
            tick_millis: cfg.tick_millis,
        });
    }
    if cfg.time_limit_secs == 0 {
        return Err(ValidationError::NonPositiveTimeLimit);
    }
    for p in [cfg.event_chance_easy, cfg.event_chance_hard] {
        if !p.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(ValidationError::ProbabilityOutOfRange(p));
        }
    }
    Ok(())
}
