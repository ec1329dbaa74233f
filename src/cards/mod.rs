//! Card system: cards in play, deck source records, and the deck catalog.
//!
//! ## Key Types
//!
//! - `Card`: combat stats plus face-up flag and board position
//! - `CardRecord`: static card data as stored in a deck source
//! - `Deck` / `DeckCatalog`: named decks the stages draw their pool from
//! - `star_bonus`: the 1%-per-star stat scaling used in every comparison

pub mod card;
pub mod catalog;
pub mod record;

pub use card::{star_bonus, Card, CardId};
pub use catalog::{Deck, DeckCatalog};
pub use record::CardRecord;
