//! Simulated time and the day/night cycle.

use garden_core::{SimConfig, SimulationState};

/// Advance one tick. Returns `true` when the orbit counter changed and
/// daylight flipped.
pub fn advance_clock(state: &mut SimulationState, cfg: &SimConfig) -> bool {
    state.tick += 1;
    state.elapsed_time = cfg.elapsed_at(state.tick);
    let orbit = cfg.orbit_at(state.tick);
    if orbit == state.orbit_count {
        return false;
    }
    state.orbit_count = orbit;
    state.is_daylight = !state.is_daylight;
    true
}
