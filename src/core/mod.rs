//! Core engine types: sides, RNG, configuration, errors.
//!
//! These are the building blocks shared by cards, the battle engine and the
//! win rules. None of them hold process-wide state.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{Anchors, LevelCatalog, Position, RulesConfig, StageConfig};
pub use error::{EngineError, ErrorKind, LoadError};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
