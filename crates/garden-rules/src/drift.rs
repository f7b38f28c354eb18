//! Passive per-tick resource drift.

use garden_core::{Difficulty, ResourceId, SimulationState};

pub const WATER_DRAIN: f64 = 0.08;
pub const NUTRIENT_DRAIN: f64 = 0.05;
pub const CO2_DRAIN: f64 = 0.1;
pub const ENERGY_DRAIN: f64 = 0.06;
pub const LIGHT_GAIN_DAY: f64 = 0.15;
pub const LIGHT_LOSS_NIGHT: f64 = 0.2;
pub const TEMPERATURE_SHIFT: f64 = 0.01;
const HUMIDITY_WATER_COUPLING: f64 = 0.002;
const HUMIDITY_TEMPERATURE_COUPLING: f64 = -0.01;

/// Apply one tick of drift. Humidity couples to the water and temperature
/// readings taken before this tick's drift.
pub fn apply_drift(state: &mut SimulationState) {
    let hard = state.difficulty == Difficulty::Hard;
    let daylight = state.is_daylight;
    let water_before = state.resource(ResourceId::Water);
    let temperature_before = state.resource(ResourceId::Temperature);
    let r = &mut state.resources;

    r.adjust(ResourceId::Water, -WATER_DRAIN);
    r.adjust(ResourceId::Nutrients, -NUTRIENT_DRAIN);
    if hard {
        r.adjust(ResourceId::Co2, -CO2_DRAIN);
        r.adjust(ResourceId::Energy, -ENERGY_DRAIN);
    }

    if daylight {
        r.adjust(ResourceId::Light, LIGHT_GAIN_DAY);
        r.adjust(ResourceId::Temperature, TEMPERATURE_SHIFT);
    } else {
        r.adjust(ResourceId::Light, -LIGHT_LOSS_NIGHT);
        r.adjust(ResourceId::Temperature, -TEMPERATURE_SHIFT);
    }

    if hard {
        let shift = (water_before - 50.0) * HUMIDITY_WATER_COUPLING
            + (temperature_before - 22.0) * HUMIDITY_TEMPERATURE_COUPLING;
        r.adjust(ResourceId::Humidity, shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easy_daylight_drift() {
        let mut s = SimulationState::new(Difficulty::Easy);
        apply_drift(&mut s);
        assert!(close(s.resource(ResourceId::Water), 49.92));
        assert!(close(s.resource(ResourceId::Nutrients), 49.95));
        assert!(close(s.resource(ResourceId::Light), 50.15));
        assert!(close(s.resource(ResourceId::Temperature), 22.01));
        assert_eq!(s.resource(ResourceId::Co2), 50.0);
        assert_eq!(s.resource(ResourceId::Energy), 100.0);
        assert_eq!(s.resource(ResourceId::Humidity), 50.0);
    }

    #[test]
    fn hard_night_drift() {
        let mut s = SimulationState::new(Difficulty::Hard);
        s.is_daylight = false;
        s.resources.set(ResourceId::Water, 60.0);
        s.resources.set(ResourceId::Temperature, 24.0);
        apply_drift(&mut s);
        assert!(close(s.resource(ResourceId::Light), 49.8));
        assert!(close(s.resource(ResourceId::Temperature), 23.99));
        assert!(close(s.resource(ResourceId::Co2), 49.9));
        assert!(close(s.resource(ResourceId::Energy), 99.94));
        // (60-50)*0.002 + (24-22)*-0.01 = 0.0
        assert!(close(s.resource(ResourceId::Humidity), 50.0));
    }

    #[test]
    fn drift_clamps_at_edges() {
        let mut s = SimulationState::new(Difficulty::Hard);
        s.resources.set(ResourceId::Water, 0.0);
        s.resources.set(ResourceId::Light, 100.0);
        s.resources.set(ResourceId::Temperature, 30.0);
        s.resources.set(ResourceId::Energy, 0.01);
        apply_drift(&mut s);
        assert_eq!(s.resource(ResourceId::Water), 0.0);
        assert_eq!(s.resource(ResourceId::Light), 100.0);
        assert_eq!(s.resource(ResourceId::Temperature), 30.0);
        assert_eq!(s.resource(ResourceId::Energy), 0.0);
    }
}
