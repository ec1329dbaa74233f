//! Duel participants.
//!
//! A `Participant` holds a hand of cards and the aggregate stats derived
//! from it. Cards only ever move one way, from the hand to the played pile:
//!
//! ```text
//! assign_hand ──► hand ──play_next_card──► played
//! ```
//!
//! The dealt hand is kept as a snapshot so that HP, attack and defense are
//! derived from what the participant was given, not from what is left.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::config::{Anchors, RulesConfig};
use crate::core::error::EngineError;
use crate::core::side::Side;

/// Card storage for hands and played piles.
/// SmallVec keeps typical hand sizes (up to 8) off the heap.
pub type Cards = SmallVec<[Card; 8]>;

/// Damage dealt by `attacker` to a defender whose active card is `defender`.
///
/// Both stats get their own card's star bonus. A defense above the attack
/// gives negative damage, which restores HP.
#[must_use]
pub fn compute_damage(attacker: &Card, defender: &Card, multiplier: i64) -> i64 {
    (attacker.bonus_attack() - defender.bonus_defense()) * multiplier
}

/// One side of a duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    name: String,
    side: Side,

    /// HP at deal time; the heal baseline.
    initial_hp: i64,
    current_hp: i64,
    attack: i64,
    defense: i64,
    score: u64,

    /// Snapshot of the hand as dealt.
    dealt: Cards,
    /// Cards still to play. The last card is played first.
    hand: Cards,
    /// Played cards, oldest first.
    played: Cards,

    anchors: Anchors,
}

impl Participant {
    /// Create a participant with no cards.
    pub fn new(name: impl Into<String>, side: Side, anchors: Anchors) -> Self {
        Self {
            name: name.into(),
            side,
            initial_hp: 0,
            current_hp: 0,
            attack: 0,
            defense: 0,
            score: 0,
            dealt: Cards::new(),
            hand: Cards::new(),
            played: Cards::new(),
            anchors,
        }
    }

    // === Identity ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    // === Stats ===

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.current_hp
    }

    #[must_use]
    pub fn initial_hp(&self) -> i64 {
        self.initial_hp
    }

    #[must_use]
    pub fn attack(&self) -> i64 {
        self.attack
    }

    #[must_use]
    pub fn defense(&self) -> i64 {
        self.defense
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn add_score(&mut self, delta: u64) {
        self.score += delta;
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    // === Cards ===

    /// The hand as originally dealt.
    #[must_use]
    pub fn dealt(&self) -> &[Card] {
        &self.dealt
    }

    /// Cards left to play; the last one is played next.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn played(&self) -> &[Card] {
        &self.played
    }

    #[must_use]
    pub fn cards_left(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    /// The card on top of the draw pile, if any.
    #[must_use]
    pub fn next_card(&self) -> Option<&Card> {
        self.hand.last()
    }

    /// The most recently played card.
    pub fn current_card(&self) -> Result<&Card, EngineError> {
        self.played
            .last()
            .ok_or(EngineError::NoCardPlayed(self.side))
    }

    /// Replace the hand with freshly dealt cards.
    ///
    /// Every card is moved to the draw anchor, the dealt snapshot is taken,
    /// and the played pile is emptied. Stats are not touched; call
    /// `derive_initial_stats` afterwards.
    pub fn assign_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        let draw = self.anchors.draw;
        self.hand = cards
            .into_iter()
            .map(|mut card| {
                card.move_to(draw);
                card
            })
            .collect();
        self.dealt = self.hand.clone();
        self.played.clear();
    }

    /// Derive HP, attack and defense by summing over the dealt hand.
    pub fn derive_initial_stats(&mut self) {
        let (hp, atk, def) = self.dealt.iter().fold((0i64, 0i64, 0i64), |(hp, atk, def), c| {
            (
                hp + i64::from(c.hp()),
                atk + i64::from(c.atk()),
                def + i64::from(c.def()),
            )
        });
        self.initial_hp = hp;
        self.current_hp = hp;
        self.attack = atk;
        self.defense = def;
    }

    /// Play the top card of the hand: reveal it and move it to the played pile.
    ///
    /// Returns `None`, changing nothing, when the hand is empty.
    pub fn play_next_card(&mut self) -> Option<&Card> {
        let mut card = self.hand.pop()?;
        card.set_revealed(true);
        card.move_to(self.anchors.played);
        self.played.push(card);
        self.played.last()
    }

    /// Like `play_next_card`, but an empty hand is a contract error.
    pub fn try_play_next_card(&mut self) -> Result<&Card, EngineError> {
        let side = self.side;
        self.play_next_card().ok_or(EngineError::EmptyHand(side))
    }

    /// Take a hit from `attacker` against this participant's current card.
    ///
    /// HP is floored at zero but has no ceiling: negative damage raises it.
    /// The current card leaves this participant's attack and defense totals.
    /// Returns the damage dealt.
    pub fn apply_damage(
        &mut self,
        attacker: &Card,
        is_critical: bool,
        rules: &RulesConfig,
    ) -> Result<i64, EngineError> {
        let multiplier = if is_critical { rules.critical_multiplier } else { 1 };
        let defender = self.current_card()?;
        let (def_atk, def_def) = (i64::from(defender.atk()), i64::from(defender.def()));
        let damage = compute_damage(attacker, defender, multiplier);

        log::debug!(
            "[{}] atk {} -> {} vs def {} -> {} x{} = {}",
            self.side,
            attacker.atk(),
            attacker.bonus_attack(),
            defender.def(),
            defender.bonus_defense(),
            multiplier,
            damage
        );

        self.current_hp = (self.current_hp - damage).max(0);
        self.attack -= def_atk;
        self.defense -= def_def;
        Ok(damage)
    }

    /// Restore HP. Returns the new HP.
    pub fn heal(&mut self, amount: i64) -> i64 {
        self.current_hp += amount.max(0);
        self.current_hp
    }

    /// HP lost since the deal.
    #[must_use]
    pub fn hp_lost(&self) -> i64 {
        (self.initial_hp - self.current_hp).max(0)
    }

    /// Clear score, cards and stats.
    pub fn reset(&mut self) {
        self.score = 0;
        self.dealt.clear();
        self.hand.clear();
        self.played.clear();
        self.initial_hp = 0;
        self.current_hp = 0;
        self.attack = 0;
        self.defense = 0;
    }

    /// Check that hand and played pile together hold exactly the dealt cards,
    /// with nothing duplicated and nothing foreign.
    #[must_use]
    pub fn cards_accounted_for(&self) -> bool {
        if self.hand.len() + self.played.len() != self.dealt.len() {
            return false;
        }
        let mut remaining: Vec<&Card> = self.dealt.iter().collect();
        for card in self.hand.iter().chain(self.played.iter()) {
            let Some(pos) = remaining
                .iter()
                .position(|d| d.id() == card.id() && d.atk() == card.atk() && d.def() == card.def())
            else {
                return false;
            };
            remaining.swap_remove(pos);
        }
        true
    }
}
