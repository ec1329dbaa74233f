//! Deck source records.
//!
//! A `CardRecord` is the static description of a card as stored in a deck:
//! an identifier, attack/defense/HP and a star count, plus the art paths the
//! presentation layer draws with.
//!
//! Card art files encode the stats in their name:
//!
//! ```text
//! 0.0.1_HP_3800_ATK_4300_DEF_2900_3.png
//! ^id    ^hp      ^atk     ^def     ^stars
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::LoadError;

const STAT_MARKERS: [&str; 3] = ["HP", "ATK", "DEF"];

/// Static card data from a deck source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub atk: u32,
    pub def: u32,
    pub hp: u32,
    #[serde(default)]
    pub stars: u32,

    /// Front art, if the record came from an art directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_art: Option<String>,
}

impl CardRecord {
    pub fn new(id: impl Into<String>, atk: u32, def: u32, hp: u32, stars: u32) -> Self {
        Self {
            id: id.into(),
            atk,
            def,
            hp,
            stars,
            front_art: None,
        }
    }

    #[must_use]
    pub fn with_front_art(mut self, path: impl Into<String>) -> Self {
        self.front_art = Some(path.into());
        self
    }

    /// Parse a record from a card art file name.
    ///
    /// Stat markers (`HP`, `ATK`, `DEF`) may appear in any order; a missing
    /// marker leaves that stat at 0. The last segment is the star count when
    /// it is numeric and not a stat value, otherwise the card has no stars.
    ///
    /// ```
    /// use card_duel::cards::CardRecord;
    ///
    /// let r = CardRecord::from_file_name("0.0.1_HP_3800_ATK_4300_DEF_2900_3.png").unwrap();
    /// assert_eq!((r.hp, r.atk, r.def, r.stars), (3800, 4300, 2900, 3));
    /// assert_eq!(r.id, "0.0.1");
    /// ```
    pub fn from_file_name(file_name: &str) -> Result<Self, LoadError> {
        let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
        let parts: Vec<&str> = stem.split('_').collect();

        let id = parts
            .first()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LoadError::Record(format!("missing card id in {:?}", file_name)))?;

        let mut record = Self::new(*id, 0, 0, 0, 0);

        for pair in parts.windows(2) {
            let slot = match pair[0] {
                "HP" => &mut record.hp,
                "ATK" => &mut record.atk,
                "DEF" => &mut record.def,
                _ => continue,
            };
            *slot = pair[1].parse().map_err(|_| {
                LoadError::Record(format!("bad {} value {:?} in {:?}", pair[0], pair[1], file_name))
            })?;
        }

        // The last segment is the star count unless it is a marker's value
        if let [.., before, last] = parts.as_slice() {
            let is_marker_value = STAT_MARKERS.contains(before);
            if !is_marker_value && !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
                record.stars = last.parse().unwrap_or(0);
            }
        }

        Ok(record)
    }
}
