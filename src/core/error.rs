//! Engine error types.
//!
//! Every engine error is synchronous and local to the call that raised it.
//! `EngineError::kind()` sorts them into three families:
//!
//! - **Configuration**: bad deck names, hand sizes the pool cannot satisfy.
//!   Raised before any card is dealt.
//! - **InvalidAction**: a legal call at the wrong moment (bonus already used,
//!   stage already over).
//! - **Contract**: the caller broke an engine contract (playing from an empty
//!   hand, asking for a card before one was played).

use crate::battle::Bonus;
use crate::core::side::Side;

/// Broad family an `EngineError` belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidAction,
    Contract,
}

/// Errors raised by the battle engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A stage configuration names a deck the catalog does not have.
    UnknownDeck(String),
    /// No configuration exists for the requested level.
    UnknownLevel(u32),
    /// A stage configuration has an empty deck name.
    EmptyDeckName(Side),
    /// Hand size must be at least one card.
    InvalidHandSize(usize),
    /// The combined pool cannot supply two disjoint hands.
    PoolTooSmall { required: usize, available: usize },
    /// The stage has not been dealt yet.
    NotDealt,
    /// The stage was already dealt.
    AlreadyDealt,
    /// The stage already has a result.
    StageFinished,
    /// The bonus was already consumed this stage.
    BonusUnavailable(Bonus),
    /// A card was requested from an empty hand.
    EmptyHand(Side),
    /// The side has not played any card yet.
    NoCardPlayed(Side),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnknownDeck(_)
            | EngineError::UnknownLevel(_)
            | EngineError::EmptyDeckName(_)
            | EngineError::InvalidHandSize(_)
            | EngineError::PoolTooSmall { .. } => ErrorKind::Configuration,
            EngineError::AlreadyDealt
            | EngineError::StageFinished
            | EngineError::BonusUnavailable(_) => ErrorKind::InvalidAction,
            EngineError::NotDealt | EngineError::EmptyHand(_) | EngineError::NoCardPlayed(_) => {
                ErrorKind::Contract
            }
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::UnknownDeck(name) => write!(f, "Unknown deck: {}", name),
            EngineError::UnknownLevel(level) => write!(f, "No configuration for level {}", level),
            EngineError::EmptyDeckName(side) => write!(f, "Deck name for {} is empty", side),
            EngineError::InvalidHandSize(size) => write!(f, "Invalid hand size: {}", size),
            EngineError::PoolTooSmall {
                required,
                available,
            } => write!(
                f,
                "Card pool too small: {} cards required, {} available",
                required, available
            ),
            EngineError::NotDealt => write!(f, "Stage has not been dealt"),
            EngineError::AlreadyDealt => write!(f, "Stage was already dealt"),
            EngineError::StageFinished => write!(f, "Stage is already finished"),
            EngineError::BonusUnavailable(bonus) => write!(f, "{} was already used", bonus),
            EngineError::EmptyHand(side) => write!(f, "The {} has no cards in hand", side),
            EngineError::NoCardPlayed(side) => write!(f, "The {} has not played a card", side),
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors raised while loading catalogs and level files.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A card record could not be built from its source.
    Record(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "I/O error: {}", err),
            LoadError::Json(err) => write!(f, "Invalid JSON: {}", err),
            LoadError::Record(msg) => write!(f, "Invalid card record: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Json(err) => Some(err),
            LoadError::Record(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            EngineError::PoolTooSmall {
                required: 4,
                available: 3
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(EngineError::UnknownDeck("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(
            EngineError::BonusUnavailable(Bonus::Heal).kind(),
            ErrorKind::InvalidAction
        );
        assert_eq!(EngineError::EmptyHand(Side::Player).kind(), ErrorKind::Contract);
        assert_eq!(EngineError::NoCardPlayed(Side::Enemy).kind(), ErrorKind::Contract);
    }

    #[test]
    fn test_display() {
        let err = EngineError::PoolTooSmall {
            required: 10,
            available: 7,
        };
        assert_eq!(
            err.to_string(),
            "Card pool too small: 10 cards required, 7 available"
        );
        assert_eq!(
            EngineError::BonusUnavailable(Bonus::Shield).to_string(),
            "shield was already used"
        );
    }

    #[test]
    fn test_load_error_from_json() {
        let err: LoadError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
