#![deny(warnings)]

//! Caretaker autopilot.
//!
//! Picks at most one resource command per call by scoring how far each
//! scored resource sits from the middle of its optimal band.

use garden_core::{Difficulty, ResourceCommand, ResourceId, SimulationState, StressLevel};
use garden_rules::ENERGY_COST;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trivial utility: higher is more urgent.
pub fn utility(urgency: f64, severity: f64) -> f64 {
    (urgency * 0.7) + (severity * 0.3)
}

/// Distance from the optimal midpoint in half-widths of the optimal band:
/// 0 at the middle, 1 at the band edge. `None` for unscored resources.
pub fn urgency(id: ResourceId, value: f64) -> Option<f64> {
    let range = id.health_range()?;
    let half = (range.optimal.max - range.optimal.min) / 2.0;
    Some((value - range.optimal.midpoint()).abs() / half)
}

fn severity(id: ResourceId, value: f64) -> f64 {
    match id.status(value) {
        Some(StressLevel::Critical) => 1.0,
        Some(StressLevel::Warning) => 0.5,
        None => 0.0,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretakerConfig {
    /// Act on a resource once its urgency reaches this.
    pub threshold: f64,
    /// Ticks to wait between two commands.
    pub cooldown_ticks: u64,
    pub step: f64,
    pub temperature_step: f64,
    /// Hard mode: top up energy below this.
    pub energy_reserve: f64,
    pub energy_step: f64,
}

impl Default for CaretakerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            cooldown_ticks: 5,
            step: 5.0,
            temperature_step: 0.5,
            energy_reserve: 30.0,
            energy_step: 10.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Caretaker {
    cfg: CaretakerConfig,
    last_action: Option<u64>,
}

impl Caretaker {
    pub fn new(cfg: CaretakerConfig) -> Self {
        Self {
            cfg,
            last_action: None,
        }
    }

    pub fn config(&self) -> &CaretakerConfig {
        &self.cfg
    }

    /// Forget the cooldown, e.g. when a new mission starts.
    pub fn reset(&mut self) {
        self.last_action = None;
    }

    /// Next command for `state`, if any is worth spending a turn on.
    pub fn plan(&mut self, state: &SimulationState) -> Option<ResourceCommand> {
        if !state.is_playing() {
            return None;
        }
        if let Some(last) = self.last_action {
            if state.tick.saturating_sub(last) < self.cfg.cooldown_ticks {
                return None;
            }
        }
        let cmd = self.choose(state)?;
        self.last_action = Some(state.tick);
        debug!(tick = state.tick, resource = %cmd.resource, direction = ?cmd.direction, amount = cmd.amount, "caretaker acts");
        Some(cmd)
    }

    fn choose(&self, state: &SimulationState) -> Option<ResourceCommand> {
        let hard = state.difficulty == Difficulty::Hard;
        let energy = state.resource(ResourceId::Energy);
        if hard && energy < self.cfg.energy_reserve {
            return Some(ResourceCommand::increase(
                ResourceId::Energy,
                self.cfg.energy_step,
            ));
        }
        if hard && energy < ENERGY_COST {
            return None;
        }

        let mut best: Option<(f64, ResourceCommand)> = None;
        for id in ResourceId::ALL
            .into_iter()
            .filter(|id| id.is_scored(state.difficulty))
        {
            let value = state.resource(id);
            let Some(u) = urgency(id, value) else {
                continue;
            };
            if u < self.cfg.threshold {
                continue;
            }
            let score = utility(u, severity(id, value));
            if best.as_ref().is_some_and(|(b, _)| *b >= score) {
                continue;
            }
            let Some(cmd) = self.correction(id, value) else {
                continue;
            };
            best = Some((score, cmd));
        }
        best.map(|(_, cmd)| cmd)
    }

    /// Step toward the optimal midpoint without overshooting it.
    fn correction(&self, id: ResourceId, value: f64) -> Option<ResourceCommand> {
        let target = id.health_range()?.optimal.midpoint();
        let step = if id == ResourceId::Temperature {
            self.cfg.temperature_step
        } else {
            self.cfg.step
        };
        let amount = step.min((target - value).abs());
        if amount <= 0.0 {
            return None;
        }
        Some(if value < target {
            ResourceCommand::increase(id, amount)
        } else {
            ResourceCommand::decrease(id, amount)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::{Direction, GamePhase, SimConfig};
    use garden_rules::{apply_command, seeded_rng, step};
    use proptest::prelude::*;

    fn playing(difficulty: Difficulty) -> SimulationState {
        let mut s = SimulationState::new(difficulty);
        s.game_phase = GamePhase::Playing;
        s
    }

    #[test]
    fn urgency_is_zero_at_the_midpoint() {
        assert_eq!(urgency(ResourceId::Water, 55.0), Some(0.0));
        assert_eq!(urgency(ResourceId::Water, 70.0), Some(1.0));
        assert_eq!(urgency(ResourceId::Temperature, 20.0), Some(1.0));
        assert_eq!(urgency(ResourceId::Energy, 5.0), None);
        assert!(utility(0.8, 0.0) < utility(0.9, 0.0));
        assert!(utility(0.8, 0.0) < utility(0.8, 0.5));
    }

    #[test]
    fn fixes_the_worst_resource_first() {
        let mut s = playing(Difficulty::Easy);
        s.resources.set(ResourceId::Water, 10.0);
        let cmd = Caretaker::default().plan(&s).unwrap();
        assert_eq!(cmd.resource, ResourceId::Water);
        assert_eq!(cmd.direction, Direction::Increase);
        assert_eq!(cmd.amount, 5.0);
    }

    #[test]
    fn respects_cooldown_and_phase() {
        let mut ai = Caretaker::default();
        let mut s = playing(Difficulty::Easy);
        assert!(ai.plan(&s).is_some());
        s.tick = 4;
        assert!(ai.plan(&s).is_none());
        s.tick = 5;
        assert!(ai.plan(&s).is_some());
        s.tick = 20;
        s.game_phase = GamePhase::Paused;
        assert!(ai.plan(&s).is_none());
    }

    #[test]
    fn hard_mode_tops_up_energy() {
        let mut s = playing(Difficulty::Hard);
        s.resources.set(ResourceId::Energy, 12.0);
        let cmd = Caretaker::default().plan(&s).unwrap();
        assert_eq!(cmd, ResourceCommand::increase(ResourceId::Energy, 10.0));
    }

    #[test]
    fn temperature_moves_in_small_steps() {
        let mut s = playing(Difficulty::Easy);
        s.resources.set(ResourceId::Light, 75.0);
        s.resources.set(ResourceId::Temperature, 26.0);
        let cmd = Caretaker::default().plan(&s).unwrap();
        assert_eq!(cmd, ResourceCommand::decrease(ResourceId::Temperature, 0.5));
    }

    #[test]
    fn config_from_partial_yaml() {
        let cfg: CaretakerConfig = serde_yaml::from_str("cooldown_ticks: 2\n").unwrap();
        assert_eq!(cfg.cooldown_ticks, 2);
        assert_eq!(cfg.step, 5.0);
    }

    fn mission(difficulty: Difficulty) -> SimulationState {
        let cfg = SimConfig {
            event_chance_easy: 0.0,
            event_chance_hard: 0.0,
            ..SimConfig::default()
        };
        let mut rng = seeded_rng(cfg.rng_seed);
        let mut ai = Caretaker::default();
        let mut s = playing(difficulty);
        while s.is_playing() {
            if let Some(cmd) = ai.plan(&s) {
                apply_command(&mut s, cmd);
            }
            step(&mut s, &cfg, &mut rng);
        }
        s
    }

    #[test]
    fn autopilot_wins_a_quiet_mission() {
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let s = mission(difficulty);
            assert_eq!(s.game_phase, GamePhase::Won, "{difficulty}");
            assert_eq!(s.elapsed_time, 300.0);
            assert!(s.plant_health > 50.0);
        }
    }

    proptest! {
        #[test]
        fn never_overshoots_the_midpoint(idx in 0usize..ResourceId::COUNT, value in 0.0f64..100.0) {
            let id = ResourceId::ALL[idx];
            let mut s = playing(Difficulty::Hard);
            let stored = s.resources.set(id, value);
            if let Some(cmd) = Caretaker::default().plan(&s) {
                if cmd.resource == id && id != ResourceId::Energy {
                    let mid = id.health_range().unwrap().optimal.midpoint();
                    let after = stored + cmd.delta();
                    prop_assert!((after - mid).abs() <= (stored - mid).abs());
                }
            }
        }
    }
}
