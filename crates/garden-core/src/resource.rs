//! Resource identifiers, valid ranges and the optimal/critical scoring table.

use crate::{Difficulty, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// One of the seven quantities the crew can adjust and the station drifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceId {
    Water,
    Light,
    Nutrients,
    Temperature,
    Humidity,
    Co2,
    Energy,
}

impl ResourceId {
    /// Number of resource identifiers.
    pub const COUNT: usize = 7;

    /// All resources in table order.
    pub const ALL: [ResourceId; Self::COUNT] = [
        ResourceId::Water,
        ResourceId::Light,
        ResourceId::Nutrients,
        ResourceId::Temperature,
        ResourceId::Humidity,
        ResourceId::Co2,
        ResourceId::Energy,
    ];

    /// Stable lowercase identifier, e.g. "co2".
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceId::Water => "water",
            ResourceId::Light => "light",
            ResourceId::Nutrients => "nutrients",
            ResourceId::Temperature => "temperature",
            ResourceId::Humidity => "humidity",
            ResourceId::Co2 => "co2",
            ResourceId::Energy => "energy",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Range every stored value is clamped into.
    pub fn valid_range(self) -> Band {
        match self {
            ResourceId::Temperature => Band::new(15.0, 30.0),
            _ => Band::new(0.0, 100.0),
        }
    }

    /// Clamp `value` into this resource's valid range.
    pub fn clamp(self, value: f64) -> f64 {
        self.valid_range().clamp(value)
    }

    /// Optimal/critical bands used for health scoring. Energy has none; it is
    /// scored by a separate floor check in hard mode.
    pub fn health_range(self) -> Option<&'static HealthRange> {
        HEALTH_TABLE[self.index()].as_ref()
    }

    /// Whether the resource is scored against the table in `difficulty`.
    pub fn is_scored(self, difficulty: Difficulty) -> bool {
        match self {
            ResourceId::Water
            | ResourceId::Light
            | ResourceId::Nutrients
            | ResourceId::Temperature => true,
            ResourceId::Humidity | ResourceId::Co2 => difficulty == Difficulty::Hard,
            ResourceId::Energy => false,
        }
    }

    /// Classify a value: `None` inside the optimal band (or for unscored
    /// resources), otherwise the stress level it falls into.
    pub fn status(self, value: f64) -> Option<StressLevel> {
        self.health_range().and_then(|r| r.classify(value))
    }

    /// Initial value on a fresh game.
    pub fn initial_value(self) -> f64 {
        match self {
            ResourceId::Temperature => 22.0,
            ResourceId::Energy => 100.0,
            _ => 50.0,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownResource(s.to_string()))
    }
}

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive containment.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// How far outside its healthy band a resource is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Warning,
    Critical,
}

/// Optimal and critical bands for one resource.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthRange {
    pub optimal: Band,
    pub critical: Band,
}

impl HealthRange {
    const fn new(optimal: (f64, f64), critical: (f64, f64)) -> Self {
        Self {
            optimal: Band::new(optimal.0, optimal.1),
            critical: Band::new(critical.0, critical.1),
        }
    }

    pub fn classify(&self, value: f64) -> Option<StressLevel> {
        if !self.critical.contains(value) {
            Some(StressLevel::Critical)
        } else if !self.optimal.contains(value) {
            Some(StressLevel::Warning)
        } else {
            None
        }
    }
}

/// Indexed by `ResourceId as usize`.
static HEALTH_TABLE: [Option<HealthRange>; ResourceId::COUNT] = [
    Some(HealthRange::new((40.0, 70.0), (20.0, 90.0))),
    Some(HealthRange::new((60.0, 90.0), (30.0, 100.0))),
    Some(HealthRange::new((45.0, 75.0), (25.0, 85.0))),
    Some(HealthRange::new((20.0, 24.0), (15.0, 28.0))),
    Some(HealthRange::new((50.0, 70.0), (30.0, 85.0))),
    Some(HealthRange::new((40.0, 70.0), (20.0, 90.0))),
    None,
];

/// Current value of every resource. Writes always clamp, so an out-of-range
/// value is never observable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<ResourceId, f64>",
    try_from = "BTreeMap<ResourceId, f64>"
)]
pub struct Resources {
    values: [f64; ResourceId::COUNT],
}

impl Resources {
    /// Values of a freshly started game.
    pub fn initial() -> Self {
        let mut values = [0.0; ResourceId::COUNT];
        for id in ResourceId::ALL {
            values[id.index()] = id.initial_value();
        }
        Self { values }
    }

    pub fn get(&self, id: ResourceId) -> f64 {
        self.values[id.index()]
    }

    /// Store `value` clamped into range; returns the stored value.
    pub fn set(&mut self, id: ResourceId, value: f64) -> f64 {
        let clamped = id.clamp(value);
        self.values[id.index()] = clamped;
        clamped
    }

    /// Add `delta` and clamp; returns the stored value.
    pub fn adjust(&mut self, id: ResourceId, delta: f64) -> f64 {
        self.set(id, self.get(id) + delta)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, f64)> + '_ {
        ResourceId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<ResourceId> for Resources {
    type Output = f64;

    fn index(&self, id: ResourceId) -> &f64 {
        &self.values[id.index()]
    }
}

impl From<Resources> for BTreeMap<ResourceId, f64> {
    fn from(r: Resources) -> Self {
        r.iter().collect()
    }
}

impl TryFrom<BTreeMap<ResourceId, f64>> for Resources {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<ResourceId, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; ResourceId::COUNT];
        for id in ResourceId::ALL {
            let v = *map.get(&id).ok_or(ValidationError::MissingResource(id))?;
            if !v.is_finite() {
                return Err(ValidationError::NonFinite);
            }
            if !id.valid_range().contains(v) {
                return Err(ValidationError::ResourceOutOfRange { id, value: v });
            }
            values[id.index()] = v;
        }
        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn table_matches_resources() {
        let water = ResourceId::Water.health_range().unwrap();
        assert_eq!(water.optimal, Band::new(40.0, 70.0));
        assert_eq!(water.critical, Band::new(20.0, 90.0));
        let temp = ResourceId::Temperature.health_range().unwrap();
        assert_eq!(temp.optimal, Band::new(20.0, 24.0));
        assert_eq!(temp.critical, Band::new(15.0, 28.0));
        let co2 = ResourceId::Co2.health_range().unwrap();
        assert_eq!(co2.critical, Band::new(20.0, 90.0));
        assert!(ResourceId::Energy.health_range().is_none());
    }

    #[test]
    fn classify_bounds_are_inclusive() {
        let light = ResourceId::Light;
        assert_eq!(light.status(60.0), None);
        assert_eq!(light.status(90.0), None);
        assert_eq!(light.status(59.9), Some(StressLevel::Warning));
        assert_eq!(light.status(30.0), Some(StressLevel::Warning));
        assert_eq!(light.status(29.9), Some(StressLevel::Critical));
        assert_eq!(ResourceId::Energy.status(0.0), None);
    }

    #[test]
    fn scored_resources_follow_difficulty() {
        let easy: Vec<_> = ResourceId::ALL
            .into_iter()
            .filter(|id| id.is_scored(Difficulty::Easy))
            .collect();
        assert_eq!(
            easy,
            vec![
                ResourceId::Water,
                ResourceId::Light,
                ResourceId::Nutrients,
                ResourceId::Temperature
            ]
        );
        assert!(ResourceId::Humidity.is_scored(Difficulty::Hard));
        assert!(!ResourceId::Energy.is_scored(Difficulty::Hard));
    }

    #[test]
    fn initial_values() {
        let r = Resources::initial();
        assert_eq!(r[ResourceId::Water], 50.0);
        assert_eq!(r[ResourceId::Temperature], 22.0);
        assert_eq!(r[ResourceId::Energy], 100.0);
        assert_eq!(r[ResourceId::Co2], 50.0);
    }

    #[test]
    fn parse_ids() {
        assert_eq!("CO2".parse::<ResourceId>().unwrap(), ResourceId::Co2);
        assert_eq!(" water ".parse::<ResourceId>().unwrap(), ResourceId::Water);
        assert!(matches!(
            "oxygen".parse::<ResourceId>(),
            Err(ValidationError::UnknownResource(_))
        ));
    }

    #[test]
    fn serializes_as_map() {
        let json = serde_json::to_value(Resources::initial()).unwrap();
        assert_eq!(json["temperature"], 22.0);
        assert_eq!(json["co2"], 50.0);
        let mut obj = json.as_object().unwrap().clone();
        obj.insert("water".into(), serde_json::json!(140.0));
        let err = serde_json::from_value::<Resources>(serde_json::Value::Object(obj));
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn writes_stay_in_range(idx in 0usize..ResourceId::COUNT,
                                start in -500.0f64..500.0,
                                delta in -500.0f64..500.0) {
            let id = ResourceId::ALL[idx];
            let mut r = Resources::initial();
            r.set(id, start);
            let v = r.adjust(id, delta);
            prop_assert!(id.valid_range().contains(v));
            prop_assert_eq!(v, r[id]);
        }
    }
}
