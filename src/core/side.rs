//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! A duel always has exactly two participants: the human-controlled
//! `Player` and the computer-controlled `Enemy`.
//!
//! ## SideMap
//!
//! Fixed per-side storage backed by a two-element array.
//! Supports iteration and indexing by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two participants of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled participant.
    Player,
    /// The computer-controlled participant.
    Enemy,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Enemy];

    /// Get the storage index (player = 0, enemy = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    /// Get the other side.
    ///
    /// ```
    /// use card_duel::core::Side;
    ///
    /// assert_eq!(Side::Player.opponent(), Side::Enemy);
    /// assert_eq!(Side::Enemy.opponent(), Side::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use card_duel::core::{Side, SideMap};
///
/// let mut hp: SideMap<i64> = SideMap::with_value(500);
/// hp[Side::Enemy] = 440;
///
/// assert_eq!(hp[Side::Player], 500);
/// assert_eq!(hp[Side::Enemy], 440);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Enemy)],
        }
    }

    /// Create a map from explicit player and enemy values.
    pub fn from_pair(player: T, enemy: T) -> Self {
        Self {
            data: [player, enemy],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Get a reference to one side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to one side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs, player first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }

    /// Apply a function to each side's value.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> IntoIterator for SideMap<T> {
    type Item = (Side, T);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Side, 2>, std::array::IntoIter<T, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        Side::BOTH.into_iter().zip(self.data)
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Player.index(), 0);
        assert_eq!(Side::Enemy.index(), 1);
        assert_eq!(format!("{}", Side::Enemy), "enemy");
    }

    #[test]
    fn test_opponent_is_involution() {
        for side in Side::BOTH {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|s| s.index() as i32 * 10);
        assert_eq!(map[Side::Player], 0);
        assert_eq!(map[Side::Enemy], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);
        map[Side::Player] = 3;
        *map.get_mut(Side::Enemy) += 7;

        assert_eq!(map[Side::Player], 3);
        assert_eq!(map[Side::Enemy], 7);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::from_pair("a", "b");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Player, &"a"), (Side::Enemy, &"b")]);
    }

    #[test]
    fn test_side_map_into_iter() {
        let map = SideMap::from_pair(String::from("a"), String::from("b"));
        let owned: Vec<(Side, String)> = map.into_iter().collect();
        assert_eq!(owned[0], (Side::Player, "a".to_string()));
        assert_eq!(owned[1], (Side::Enemy, "b".to_string()));
    }

    #[test]
    fn test_side_map_map() {
        let map = SideMap::from_pair(2, 5);
        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled, SideMap::from_pair(4, 10));
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::from_pair(1, 2);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
