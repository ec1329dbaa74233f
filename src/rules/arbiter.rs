//! Win arbitration.
//!
//! After every round, and on every presentation tick, the stage asks the
//! arbiter whether the duel is over. Rules are checked in strict priority
//! order; the first that matches decides and the rest are ignored:
//!
//! 1. Player HP ≤ 0 → enemy wins.
//! 2. Enemy HP ≤ 0 → player wins.
//! 3. Timer at 0 → higher HP wins; equal HP is a draw.
//! 4. Player out of cards and behind on HP → enemy wins.
//! 5. Enemy out of cards and behind on HP → player wins.

use serde::{Deserialize, Serialize};

use crate::core::side::{Side, SideMap};

/// Result of a completed stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Time ran out with both sides on equal HP.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }

    /// The winning side, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::Winner(side) => Some(*side),
            GameResult::Draw => None,
        }
    }
}

/// The rule that ended a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// A side was reduced to 0 HP.
    KnockedOut(Side),
    /// The countdown reached zero.
    TimeExpired,
    /// A side ran out of cards while behind on HP.
    OutOfCards(Side),
}

/// A decided stage: who won and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub result: GameResult,
    pub rule: WinRule,
}

/// The slice of stage state the rules look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArbiterView {
    pub hp: SideMap<i64>,
    pub cards_left: SideMap<usize>,
    pub seconds_left: u32,
}

/// Decide the stage, or return `None` if play continues.
///
/// ```
/// use card_duel::core::{Side, SideMap};
/// use card_duel::rules::{arbitrate, ArbiterView, GameResult};
///
/// let view = ArbiterView {
///     hp: SideMap::from_pair(0, 300),
///     cards_left: SideMap::from_pair(2, 2),
///     seconds_left: 0,
/// };
/// // Knock-out outranks time expiry
/// assert_eq!(arbitrate(&view).unwrap().result, GameResult::Winner(Side::Enemy));
/// ```
#[must_use]
pub fn arbitrate(view: &ArbiterView) -> Option<Verdict> {
    // Rules 1-2
    for side in Side::BOTH {
        if view.hp[side] <= 0 {
            return Some(Verdict {
                result: GameResult::Winner(side.opponent()),
                rule: WinRule::KnockedOut(side),
            });
        }
    }

    // Rule 3
    if view.seconds_left == 0 {
        let (player, enemy) = (view.hp[Side::Player], view.hp[Side::Enemy]);
        let result = match player.cmp(&enemy) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::Player),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Enemy),
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        return Some(Verdict {
            result,
            rule: WinRule::TimeExpired,
        });
    }

    // Rules 4-5
    for side in Side::BOTH {
        if view.cards_left[side] == 0 && view.hp[side] < view.hp[side.opponent()] {
            return Some(Verdict {
                result: GameResult::Winner(side.opponent()),
                rule: WinRule::OutOfCards(side),
            });
        }
    }

    None
}
