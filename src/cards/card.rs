//! Battle cards.
//!
//! A `Card` carries fixed combat stats (attack, defense, HP, star rating)
//! and two pieces of mutable presentation state: whether it is face up and
//! where it sits on the board. Nothing else about a card changes during a
//! stage.

use serde::{Deserialize, Serialize};

use super::record::CardRecord;
use crate::core::config::Position;

/// Identifier of a card, taken from its source record (e.g. `"0.0.1"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Scale a stat by its card's star rating: each star adds 1%, truncated.
///
/// Computes `floor(stat_base * (1 + stars / 100))` in exact integer
/// arithmetic.
///
/// ```
/// use card_duel::cards::star_bonus;
///
/// assert_eq!(star_bonus(4300, 0), 4300);
/// assert_eq!(star_bonus(4300, 3), 4429);
/// assert_eq!(star_bonus(199, 1), 200); // 200.99 truncates
/// ```
#[must_use]
pub fn star_bonus(stat_base: u32, stars: u32) -> i64 {
    (u64::from(stat_base) * (100 + u64::from(stars)) / 100) as i64
}

/// A card in play.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{Card, CardId};
///
/// let card = Card::new(CardId::new("0.0.1"), 4300, 2900, 3800, 3);
/// assert_eq!(card.bonus_attack(), 4429);
/// assert!(!card.is_revealed());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    atk: u32,
    def: u32,
    hp: u32,
    stars: u32,

    /// Face up?
    revealed: bool,

    /// Board position (presentational).
    position: Position,
}

impl Card {
    /// Create a face-down card at the origin.
    #[must_use]
    pub fn new(id: CardId, atk: u32, def: u32, hp: u32, stars: u32) -> Self {
        Self {
            id,
            atk,
            def,
            hp,
            stars,
            revealed: false,
            position: Position::default(),
        }
    }

    /// Build a face-down card from a deck source record.
    #[must_use]
    pub fn from_record(record: &CardRecord) -> Self {
        Self::new(
            CardId::new(record.id.clone()),
            record.atk,
            record.def,
            record.hp,
            record.stars,
        )
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn atk(&self) -> u32 {
        self.atk
    }

    #[must_use]
    pub fn def(&self) -> u32 {
        self.def
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[must_use]
    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Attack with the star bonus applied.
    #[must_use]
    pub fn bonus_attack(&self) -> i64 {
        star_bonus(self.atk, self.stars)
    }

    /// Defense with the star bonus applied.
    #[must_use]
    pub fn bonus_defense(&self) -> i64 {
        star_bonus(self.def, self.stars)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flip the card.
    pub fn toggle_revealed(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}
