//! Named decks and the catalog that holds them.
//!
//! The `DeckCatalog` stores every deck known to the game, keyed by name.
//! Stages look decks up by the names in their `StageConfig`.
//!
//! A catalog can be loaded from its JSON form or built by scanning an art
//! directory laid out as one sub-directory per deck:
//!
//! ```text
//! decks/
//!   goku/
//!     reverse.png
//!     0.0.1_HP_3800_ATK_4300_DEF_2900_3.png
//!     ...
//!   frieza/
//!     ...
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::record::CardRecord;
use crate::core::error::{EngineError, LoadError};

/// A named deck of card records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Card back art shared by every card of the deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_art: Option<String>,

    pub cards: Vec<CardRecord>,
}

impl Deck {
    #[must_use]
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            reverse_art: None,
            cards,
        }
    }

    #[must_use]
    pub fn with_reverse_art(mut self, path: impl Into<String>) -> Self {
        self.reverse_art = Some(path.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Catalog of decks keyed by name.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardRecord, Deck, DeckCatalog};
///
/// let mut catalog = DeckCatalog::new();
/// catalog.insert("goku", Deck::new(vec![CardRecord::new("g1", 100, 50, 500, 0)]));
///
/// assert_eq!(catalog.deck("goku").unwrap().len(), 1);
/// assert!(catalog.deck("vegeta").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCatalog {
    decks: FxHashMap<String, Deck>,
}

impl DeckCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a deck.
    pub fn insert(&mut self, name: impl Into<String>, deck: Deck) {
        self.decks.insert(name.into(), deck);
    }

    /// Builder form of `insert`.
    #[must_use]
    pub fn with_deck(mut self, name: impl Into<String>, deck: Deck) -> Self {
        self.insert(name, deck);
        self
    }

    /// Look a deck up by name.
    pub fn deck(&self, name: &str) -> Result<&Deck, EngineError> {
        self.decks
            .get(name)
            .ok_or_else(|| EngineError::UnknownDeck(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.decks.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Deck names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a catalog from its JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Write the catalog as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Build a catalog from an art directory with one sub-directory per deck.
    ///
    /// Files whose name contains `reverse` become the deck's back art.
    /// Files whose name does not parse as a card are skipped with a warning.
    pub fn scan_dir(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut catalog = Self::new();

        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let deck = Self::scan_deck(&entry.path())?;
            log::info!("scanned deck {:?}: {} cards", name, deck.len());
            catalog.insert(name, deck);
        }

        Ok(catalog)
    }

    fn scan_deck(dir: &Path) -> Result<Deck, LoadError> {
        let mut files: Vec<(String, String)> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path().to_string_lossy().replace('\\', "/");
                files.push((file_name, path));
            }
        }
        // read_dir order is platform-dependent
        files.sort();

        let mut deck = Deck::default();
        for (file_name, path) in files {
            if file_name.contains("reverse") {
                deck.reverse_art = Some(path);
                continue;
            }
            match CardRecord::from_file_name(&file_name) {
                Ok(record) => deck.cards.push(record.with_front_art(path)),
                Err(err) => log::warn!("skipping {:?}: {}", file_name, err),
            }
        }

        Ok(deck)
    }
}
