//! Growth stages, difficulty and the game phase machine.

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Six ordered phases of plant development.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seed,
    Germination,
    Seedling,
    Vegetative,
    Budding,
    Flowering,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 6] = [
        GrowthStage::Seed,
        GrowthStage::Germination,
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Budding,
        GrowthStage::Flowering,
    ];

    /// The stage after this one, if any.
    pub fn next(self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Seed => Some(GrowthStage::Germination),
            GrowthStage::Germination => Some(GrowthStage::Seedling),
            GrowthStage::Seedling => Some(GrowthStage::Vegetative),
            GrowthStage::Vegetative => Some(GrowthStage::Budding),
            GrowthStage::Budding => Some(GrowthStage::Flowering),
            GrowthStage::Flowering => None,
        }
    }

    /// Growth progress that must be strictly exceeded to enter this stage.
    pub fn entry_threshold(self) -> f64 {
        match self {
            GrowthStage::Seed => 0.0,
            GrowthStage::Germination => 20.0,
            GrowthStage::Seedling => 35.0,
            GrowthStage::Vegetative => 55.0,
            GrowthStage::Budding => 75.0,
            GrowthStage::Flowering => 95.0,
        }
    }

    pub fn is_final(self) -> bool {
        self == GrowthStage::Flowering
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Germination => "germination",
            GrowthStage::Seedling => "seedling",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Budding => "budding",
            GrowthStage::Flowering => "flowering",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session difficulty, fixed at game start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Top-level phase; only `Playing` advances the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Menu,
    Tutorial,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    /// Transitions a front end may request. `Playing -> Won|Lost` is reserved
    /// for the outcome judge and is not listed here.
    pub fn can_request(self, to: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, to),
            (Menu, Tutorial)
                | (Tutorial, Playing)
                | (Tutorial, Menu)
                | (Playing, Paused)
                | (Paused, Playing)
                | (Paused, Menu)
                | (Won, Menu)
                | (Lost, Menu)
                | (Won, Playing)
                | (Lost, Playing)
        )
    }

    /// Transitions the engine itself performs when the judge fires.
    pub fn can_conclude(self, to: GamePhase) -> bool {
        self == GamePhase::Playing && to.is_terminal()
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GamePhase::Menu => "menu",
            GamePhase::Tutorial => "tutorial",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
        })
    }
}
