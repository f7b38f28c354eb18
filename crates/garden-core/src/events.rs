//! Disruptive station events and the capped event log.

use crate::{Difficulty, GrowthStage, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Catalogue of disruptive events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SolarFlare,
    TempSpike,
    WaterLeak,
    AirSystem,
    PowerSave,
    HumidityRise,
}

/// Fixed parameters of an event kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventDef {
    pub effect: ResourceId,
    /// Total swing in resource units; each tick applies one hundredth of it.
    pub change: f64,
    pub duration_secs: f64,
}

const EASY_POOL: [EventKind; 3] = [
    EventKind::SolarFlare,
    EventKind::TempSpike,
    EventKind::WaterLeak,
];

const HARD_POOL: [EventKind; 6] = [
    EventKind::SolarFlare,
    EventKind::TempSpike,
    EventKind::WaterLeak,
    EventKind::AirSystem,
    EventKind::PowerSave,
    EventKind::HumidityRise,
];

impl EventKind {
    pub fn def(self) -> EventDef {
        let (effect, change, duration_secs) = match self {
            EventKind::SolarFlare => (ResourceId::Light, -15.0, 20.0),
            EventKind::TempSpike => (ResourceId::Temperature, 3.0, 15.0),
            EventKind::WaterLeak => (ResourceId::Water, -10.0, 10.0),
            EventKind::AirSystem => (ResourceId::Co2, -20.0, 25.0),
            EventKind::PowerSave => (ResourceId::Energy, -30.0, 30.0),
            EventKind::HumidityRise => (ResourceId::Humidity, 15.0, 20.0),
        };
        EventDef {
            effect,
            change,
            duration_secs,
        }
    }

    /// Events that can fire in `difficulty`.
    pub fn pool(difficulty: Difficulty) -> &'static [EventKind] {
        match difficulty {
            Difficulty::Easy => &EASY_POOL,
            Difficulty::Hard => &HARD_POOL,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            EventKind::SolarFlare => "solar_flare",
            EventKind::TempSpike => "temp_spike",
            EventKind::WaterLeak => "water_leak",
            EventKind::AirSystem => "air_system",
            EventKind::PowerSave => "power_save",
            EventKind::HumidityRise => "humidity_rise",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EventKind::SolarFlare => "Solar flare",
            EventKind::TempSpike => "Temperature spike",
            EventKind::WaterLeak => "Water leak",
            EventKind::AirSystem => "Air system failure",
            EventKind::PowerSave => "Power saving mode",
            EventKind::HumidityRise => "Humidity rise",
        }
    }
}

/// The single event currently affecting the station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub effect: ResourceId,
    pub magnitude_per_tick: f64,
    /// Remaining simulated seconds.
    pub time_left: f64,
}

impl ActiveEvent {
    pub fn activate(kind: EventKind) -> Self {
        let def = kind.def();
        Self {
            kind,
            effect: def.effect,
            magnitude_per_tick: def.change * 0.01,
            time_left: def.duration_secs,
        }
    }
}

/// Log messages; rendering to a locale is the front end's job; `Display`
/// gives the English text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogMessage {
    StageReached { stage: GrowthStage },
    EventDetected { event: EventKind },
    EventResolved { event: EventKind },
    InsufficientEnergy,
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::StageReached { stage } => f.write_str(match stage {
                GrowthStage::Seed => "Seed planted",
                GrowthStage::Germination => "Germination started!",
                GrowthStage::Seedling => "Seedling emerging!",
                GrowthStage::Vegetative => "Vegetative phase reached",
                GrowthStage::Budding => "Buds are forming",
                GrowthStage::Flowering => "The zinnia is flowering!",
            }),
            LogMessage::EventDetected { event } => write!(f, "{} detected!", event.title()),
            LogMessage::EventResolved { event } => write!(f, "{} resolved", event.title()),
            LogMessage::InsufficientEnergy => f.write_str("Insufficient energy for that action"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: LogMessage,
    /// Simulated seconds, rounded to one decimal.
    pub time: f64,
}

/// Most-recent-first log holding at most [`EventLog::CAPACITY`] entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "VecDeque<LogEntry>", from = "VecDeque<LogEntry>")]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl From<VecDeque<LogEntry>> for EventLog {
    fn from(mut entries: VecDeque<LogEntry>) -> Self {
        entries.truncate(Self::CAPACITY);
        Self { entries }
    }
}

impl From<EventLog> for VecDeque<LogEntry> {
    fn from(log: EventLog) -> Self {
        log.entries
    }
}

impl EventLog {
    pub const CAPACITY: usize = 5;

    pub fn push(&mut self, message: LogMessage, time: f64) {
        self.entries.push_front(LogEntry {
            message,
            time: (time * 10.0).round() / 10.0,
        });
        self.entries.truncate(Self::CAPACITY);
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
