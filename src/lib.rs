//! # card-duel
//!
//! A turn-based card battle engine: a player and an enemy are dealt hands
//! from a shared pool, play one card each per round, and trade damage until
//! one side is knocked out, runs out of cards while behind, or the clock
//! runs out.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never draws, plays sound or reads
//!    input. A front end calls into a `Stage` and reads its state back.
//!
//! 2. **Symmetric Sides**: Every per-side operation is parameterised over
//!    `Side`; the only asymmetries are the ones the rules call for (ties go
//!    to the player, the shield and heal belong to the player, the score is
//!    the player's).
//!
//! 3. **Deterministic**: All randomness (shuffle, deal, critical rolls) comes
//!    from one seeded `GameRng` owned by the stage. Same seed, same game.
//!
//! ## Modules
//!
//! - `core`: sides, RNG, configuration and errors
//! - `cards`: cards, deck records and the deck catalog
//! - `battle`: participants, dealing, round resolution, the stage controller
//! - `rules`: win arbitration
//! - `ranking`: the `name,score` leaderboard file

pub mod battle;
pub mod cards;
pub mod core;
pub mod ranking;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Anchors, EngineError, ErrorKind, GameRng, GameRngState, LevelCatalog, LoadError, Position,
    RulesConfig, Side, SideMap, StageConfig,
};

pub use crate::cards::{star_bonus, Card, CardId, CardRecord, Deck, DeckCatalog};

pub use crate::battle::{
    Bonus, BonusEffect, Participant, RoundOutcome, RoundRecord, Stage, StageStatus, StageTimer,
};

pub use crate::rules::{GameResult, Verdict, WinRule};

pub use crate::ranking::{RankingEntry, RankingError, RankingStore};
