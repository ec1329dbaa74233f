//! Engine and stage configuration.
//!
//! - `RulesConfig`: combat constants (timer length, critical odds, heal ratio)
//! - `StageConfig`: per-level deck names, hand size and board anchors
//! - `LevelCatalog`: every level's `StageConfig`, loaded from JSON
//!
//! The engine consumes only the two deck names and the hand size from a
//! `StageConfig`; anchors are carried for the presentation layer.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, LoadError};
use super::side::Side;

/// Board coordinates. Presentational only; the engine never reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where a participant's draw pile and played pile sit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    pub draw: Position,
    pub played: Position,
}

impl Anchors {
    /// Default board layout for a side.
    #[must_use]
    pub const fn default_for(side: Side) -> Self {
        match side {
            Side::Player => Self {
                draw: Position::new(450, 500),
                played: Position::new(950, 500),
            },
            Side::Enemy => Self {
                draw: Position::new(450, 100),
                played: Position::new(950, 100),
            },
        }
    }
}

/// Combat constants shared by every stage.
///
/// ```
/// use card_duel::core::RulesConfig;
///
/// let rules = RulesConfig::default().with_critical_multiplier(3);
/// assert_eq!(rules.critical_multiplier, 3);
/// assert_eq!(rules.stage_seconds, 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Countdown length of a stage, in seconds.
    pub stage_seconds: u32,

    /// Damage multiplier applied on a critical hit.
    pub critical_multiplier: i64,

    /// A critical is one of this many equally likely outcomes per round.
    pub critical_outcomes: u32,

    /// Share of lost HP restored by the heal bonus, in percent.
    pub heal_ratio_percent: u32,

    /// How long the critical-hit visual effect stays up, in milliseconds.
    pub critical_effect_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            stage_seconds: 60,
            critical_multiplier: 5,
            critical_outcomes: 4,
            heal_ratio_percent: 75,
            critical_effect_ms: 1000,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_stage_seconds(mut self, seconds: u32) -> Self {
        self.stage_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_critical_multiplier(mut self, multiplier: i64) -> Self {
        self.critical_multiplier = multiplier;
        self
    }

    /// Set critical odds to one in `outcomes`.
    #[must_use]
    pub fn with_critical_outcomes(mut self, outcomes: u32) -> Self {
        self.critical_outcomes = outcomes;
        self
    }

    #[must_use]
    pub fn with_heal_ratio_percent(mut self, percent: u32) -> Self {
        self.heal_ratio_percent = percent;
        self
    }
}

/// Configuration of a single level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Deck the player's half of the pool comes from.
    pub player_deck: String,

    /// Deck the enemy's half of the pool comes from.
    pub enemy_deck: String,

    /// Cards dealt to each participant.
    pub hand_size: usize,

    /// Directory holding the card art, when the catalog is built by scanning.
    #[serde(default)]
    pub deck_path: Option<String>,

    #[serde(default = "player_anchors")]
    pub player_anchors: Anchors,

    #[serde(default = "enemy_anchors")]
    pub enemy_anchors: Anchors,
}

fn player_anchors() -> Anchors {
    Anchors::default_for(Side::Player)
}

fn enemy_anchors() -> Anchors {
    Anchors::default_for(Side::Enemy)
}

impl StageConfig {
    /// Create a configuration with the default board layout.
    pub fn new(player_deck: impl Into<String>, enemy_deck: impl Into<String>, hand_size: usize) -> Self {
        Self {
            player_deck: player_deck.into(),
            enemy_deck: enemy_deck.into(),
            hand_size,
            deck_path: None,
            player_anchors: player_anchors(),
            enemy_anchors: enemy_anchors(),
        }
    }

    /// Override the anchors of one side.
    #[must_use]
    pub fn with_anchors(mut self, side: Side, anchors: Anchors) -> Self {
        match side {
            Side::Player => self.player_anchors = anchors,
            Side::Enemy => self.enemy_anchors = anchors,
        }
        self
    }

    /// Deck name for a side.
    #[must_use]
    pub fn deck(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_deck,
            Side::Enemy => &self.enemy_deck,
        }
    }

    /// Anchors for a side.
    #[must_use]
    pub fn anchors(&self, side: Side) -> Anchors {
        match side {
            Side::Player => self.player_anchors,
            Side::Enemy => self.enemy_anchors,
        }
    }

    /// Check the parts of the configuration that do not need the catalog.
    pub fn validate(&self) -> Result<(), EngineError> {
        for side in Side::BOTH {
            if self.deck(side).trim().is_empty() {
                return Err(EngineError::EmptyDeckName(side));
            }
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidHandSize(self.hand_size));
        }
        Ok(())
    }
}

/// Every level's configuration, keyed by level number.
///
/// The JSON form maps `"level_<n>"` keys to `StageConfig` objects:
///
/// ```
/// use card_duel::core::LevelCatalog;
///
/// let json = r#"{
///     "level_1": { "player_deck": "goku", "enemy_deck": "frieza", "hand_size": 5 }
/// }"#;
/// let levels = LevelCatalog::from_json_str(json).unwrap();
/// assert_eq!(levels.level(1).unwrap().hand_size, 5);
/// assert!(levels.level(2).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: BTreeMap<u32, StageConfig>,
}

const LEVEL_PREFIX: &str = "level_";

impl LevelCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a level.
    #[must_use]
    pub fn with_level(mut self, number: u32, config: StageConfig) -> Self {
        self.levels.insert(number, config);
        self
    }

    /// Parse a catalog from JSON text. Keys that are not `level_<n>` are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut levels = BTreeMap::new();

        for (key, value) in raw {
            let Some(number) = key
                .strip_prefix(LEVEL_PREFIX)
                .and_then(|n| n.parse::<u32>().ok())
            else {
                log::debug!("ignoring non-level key {:?} in level file", key);
                continue;
            };
            levels.insert(number, serde_json::from_value(value)?);
        }

        Ok(Self { levels })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize back to the `level_<n>` JSON form.
    pub fn to_json_string(&self) -> Result<String, LoadError> {
        let raw: BTreeMap<String, &StageConfig> = self
            .levels
            .iter()
            .map(|(n, config)| (format!("{}{}", LEVEL_PREFIX, n), config))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Get the configuration of a level.
    pub fn level(&self, number: u32) -> Result<&StageConfig, EngineError> {
        self.levels
            .get(&number)
            .ok_or(EngineError::UnknownLevel(number))
    }

    /// Number of configured levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &StageConfig)> {
        self.levels.iter().map(|(n, c)| (*n, c))
    }
}
