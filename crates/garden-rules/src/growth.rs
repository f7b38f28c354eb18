//! Growth progress and stage transitions.

use garden_core::{GrowthStage, LogMessage, SimulationState};
use tracing::info;

/// Growth only happens while health is strictly above this.
pub const HEALTH_GATE: f64 = 30.0;
pub const GROWTH_PER_TICK: f64 = 0.05;

/// Accumulate progress and advance at most one stage. Returns the stage just
/// entered, if any.
pub fn advance_growth(state: &mut SimulationState) -> Option<GrowthStage> {
    if state.plant_health <= HEALTH_GATE {
        return None;
    }
    state.growth_progress = (state.growth_progress + GROWTH_PER_TICK).min(100.0);
    let next = state.growth_stage.next()?;
    if state.growth_progress <= next.entry_threshold() {
        return None;
    }
    state.growth_stage = next;
    state.log(LogMessage::StageReached { stage: next });
    info!(stage = %next, progress = state.growth_progress, t = state.elapsed_time, "growth stage reached");
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::Difficulty;

    #[test]
    fn full_run_fires_each_stage_once_in_order() {
        let mut s = SimulationState::new(Difficulty::Easy);
        let mut fired = Vec::new();
        for _ in 0..2000 {
            s.plant_health = 80.0;
            if let Some(stage) = advance_growth(&mut s) {
                fired.push(stage);
            }
        }
        assert_eq!(fired, GrowthStage::ALL[1..].to_vec());
        assert!(s.growth_progress > 95.0);
        assert!(s.growth_progress <= 100.0);
        assert_eq!(s.growth_stage, GrowthStage::Flowering);
        assert_eq!(s.event_log.len(), 5);
        assert_eq!(
            s.event_log.latest().unwrap().message,
            LogMessage::StageReached {
                stage: GrowthStage::Flowering
            }
        );
    }

    #[test]
    fn no_growth_at_or_below_gate() {
        let mut s = SimulationState::new(Difficulty::Easy);
        s.plant_health = HEALTH_GATE;
        assert_eq!(advance_growth(&mut s), None);
        assert_eq!(s.growth_progress, 0.0);
    }

    #[test]
    fn one_stage_per_tick_even_when_far_past_thresholds() {
        let mut s = SimulationState::new(Difficulty::Easy);
        s.growth_progress = 99.0;
        assert_eq!(advance_growth(&mut s), Some(GrowthStage::Germination));
        assert_eq!(advance_growth(&mut s), Some(GrowthStage::Seedling));
        assert_eq!(s.growth_stage, GrowthStage::Seedling);
    }

    #[test]
    fn progress_caps_at_hundred() {
        let mut s = SimulationState::new(Difficulty::Easy);
        s.growth_stage = GrowthStage::Flowering;
        s.growth_progress = 99.99;
        assert_eq!(advance_growth(&mut s), None);
        assert_eq!(s.growth_progress, 100.0);
    }
}
