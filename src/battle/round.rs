//! Round resolution.
//!
//! One round: both sides play their next card, a critical is rolled, the
//! star-adjusted attacks are compared and the loser of the exchange takes
//! damage. Ties go to the player.
//!
//! An active shield turns the next enemy-won exchange back on the enemy:
//! the enemy's own card is used as both attacker and defender, and the
//! shield is spent.

use serde::{Deserialize, Serialize};

use super::participant::Participant;
use crate::cards::CardId;
use crate::core::config::RulesConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::core::side::{Side, SideMap};

/// What happened in one round, for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Card each side played this round, if it had one.
    pub cards: SideMap<Option<CardId>>,

    /// Was the hit critical?
    pub critical: bool,

    /// Side that won the exchange. `None` when a side had no card.
    pub winner: Option<Side>,

    /// Side whose HP was reduced.
    pub damaged: Option<Side>,

    /// Damage dealt, after the critical multiplier. Negative when the
    /// defense outweighed the attack, in which case HP went up.
    pub damage: i64,

    /// The shield turned the damage back on the enemy.
    pub reflected: bool,

    /// Score the player earned this round.
    pub score_awarded: u64,
}

impl RoundOutcome {
    fn idle(cards: SideMap<Option<CardId>>) -> Self {
        Self {
            cards,
            critical: false,
            winner: None,
            damaged: None,
            damage: 0,
            reflected: false,
            score_awarded: 0,
        }
    }

    /// Did any card change hands this round?
    #[must_use]
    pub fn was_contested(&self) -> bool {
        self.winner.is_some()
    }
}

/// Play one card per side and resolve the exchange.
///
/// If either side had nothing to play, no critical is rolled and no damage
/// is dealt; the returned outcome has no winner.
pub fn resolve_round(
    participants: &mut SideMap<Participant>,
    shield_active: &mut bool,
    rng: &mut GameRng,
    rules: &RulesConfig,
) -> Result<RoundOutcome, EngineError> {
    let mut played = SideMap::with_value(None);
    for side in Side::BOTH {
        played[side] = participants[side].play_next_card().cloned();
    }

    let (Some(player_card), Some(enemy_card)) = (played[Side::Player].clone(), played[Side::Enemy].clone())
    else {
        log::debug!("round skipped: a side has no card to play");
        return Ok(RoundOutcome::idle(played.map(|_, c| c.as_ref().map(|c| c.id().clone()))));
    };

    let mut outcome = RoundOutcome::idle(SideMap::from_pair(
        Some(player_card.id().clone()),
        Some(enemy_card.id().clone()),
    ));
    outcome.critical = rng.roll_one_in(rules.critical_outcomes);

    let player_attack = player_card.bonus_attack();
    let enemy_attack = enemy_card.bonus_attack();
    log::debug!(
        "[player] {} atk {} (+{} from {} stars) vs [enemy] {} atk {} (+{} from {} stars)",
        player_card.id(),
        player_attack,
        player_attack - i64::from(player_card.atk()),
        player_card.stars(),
        enemy_card.id(),
        enemy_attack,
        enemy_attack - i64::from(enemy_card.atk()),
        enemy_card.stars(),
    );

    if enemy_attack > player_attack {
        outcome.winner = Some(Side::Enemy);
        if *shield_active {
            log::info!("shield reflects the enemy's hit");
            outcome.damage = participants[Side::Enemy].apply_damage(&enemy_card, outcome.critical, rules)?;
            outcome.damaged = Some(Side::Enemy);
            outcome.reflected = true;
            *shield_active = false;
        } else {
            outcome.damage = participants[Side::Player].apply_damage(&enemy_card, outcome.critical, rules)?;
            outcome.damaged = Some(Side::Player);
        }
    } else {
        outcome.winner = Some(Side::Player);
        outcome.damage = participants[Side::Enemy].apply_damage(&player_card, outcome.critical, rules)?;
        outcome.damaged = Some(Side::Enemy);

        // Score is measured against the enemy's raw defense, without stars.
        let award = (player_attack - i64::from(enemy_card.def())).max(0) as u64;
        participants[Side::Player].add_score(award);
        outcome.score_awarded = award;
    }

    if let (true, Some(winner)) = (outcome.critical, outcome.winner) {
        log::info!(
            "critical hit by the {}: x{} for {} damage",
            winner,
            rules.critical_multiplier,
            outcome.damage
        );
    }

    Ok(outcome)
}
