//! Stage controller.
//!
//! A `Stage` is one attempt at a level, from the deal to a declared result.
//!
//! ## Lifecycle
//!
//! ```text
//! initialize ──► Ready ──deal_and_start──► Running ──win check──► Finished
//!                                            │  ▲
//!                          play_round / tick │  │ activate_bonus
//!                                            ▼  │
//!                                          Running
//! ```
//!
//! `Finished` is terminal. `restart` consumes the stage and returns a fresh,
//! freshly dealt one for the same level.
//!
//! ## Win check
//!
//! Runs after every round and on every `tick`. See [`crate::rules::arbiter`]
//! for the rules and their priority. The winner is awarded the seconds left
//! on the clock as bonus score.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::deck::{check_pool, deal_hands, pool_for, DealtHands};
use super::participant::Participant;
use super::round::{resolve_round, RoundOutcome};
use super::timer::StageTimer;
use crate::cards::{Card, DeckCatalog};
use crate::core::config::{RulesConfig, StageConfig};
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::core::side::{Side, SideMap};
use crate::rules::{arbitrate, ArbiterView, GameResult, Verdict};

/// One-shot player abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    /// Restore part of the HP lost since the deal.
    Heal,
    /// Turn the next enemy-won round back on the enemy.
    Shield,
}

impl std::fmt::Display for Bonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bonus::Heal => write!(f, "heal"),
            Bonus::Shield => write!(f, "shield"),
        }
    }
}

/// What an activated bonus did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusEffect {
    /// HP restored and the player's HP afterwards.
    Healed { amount: i64, hp: i64 },
    /// The shield is up until the enemy next wins a round.
    ShieldRaised,
}

/// Where a stage is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    /// Created, not yet dealt.
    Ready,
    /// Hands dealt, rounds being played.
    Running,
    /// Decided. Never changes again.
    Finished(Verdict),
}

/// A played round, numbered from 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub outcome: RoundOutcome,
}

/// One game attempt.
#[derive(Clone, Debug)]
pub struct Stage {
    number: u32,
    config: StageConfig,
    rules: RulesConfig,
    participants: SideMap<Participant>,

    /// Both decks, face down. Kept for restarts.
    pool: Vec<Card>,

    timer: StageTimer,
    heal_available: bool,
    shield_available: bool,
    shield_active: bool,
    status: StageStatus,

    /// Timestamp (ms) of the most recent critical hit, for effect display.
    last_critical_ms: Option<u64>,

    rng: GameRng,
    history: Vec<RoundRecord>,
}

impl Stage {
    /// Build a stage for level `number`.
    ///
    /// Every configuration problem (empty or unknown deck names, a hand size
    /// of zero, a pool too small for two hands) is reported here, before
    /// anything is dealt. The enemy is named after its deck.
    pub fn initialize(
        number: u32,
        config: StageConfig,
        rules: RulesConfig,
        catalog: &DeckCatalog,
        player_name: impl Into<String>,
        rng: GameRng,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let pool = pool_for(catalog, &config)?;
        check_pool(pool.len(), config.hand_size)?;

        let names = SideMap::from_pair(player_name.into(), config.enemy_deck.clone());
        log::info!(
            "stage {} initialised: {} ({}) vs {} ({}), {} cards each from a pool of {}",
            number,
            names[Side::Player],
            config.player_deck,
            names[Side::Enemy],
            config.enemy_deck,
            config.hand_size,
            pool.len()
        );

        Ok(Self::fresh(number, config, rules, pool, names, rng))
    }

    fn fresh(
        number: u32,
        config: StageConfig,
        rules: RulesConfig,
        pool: Vec<Card>,
        names: SideMap<String>,
        rng: GameRng,
    ) -> Self {
        let participants = SideMap::new(|side| {
            Participant::new(names[side].clone(), side, config.anchors(side))
        });
        Self {
            number,
            timer: StageTimer::new(rules.stage_seconds),
            config,
            rules,
            participants,
            pool,
            heal_available: true,
            shield_available: true,
            shield_active: false,
            status: StageStatus::Ready,
            last_critical_ms: None,
            rng,
            history: Vec::new(),
        }
    }

    // === Actions ===

    /// Shuffle, deal both hands and start the clock.
    pub fn deal_and_start(&mut self) -> Result<(), EngineError> {
        self.ensure_ready()?;
        let hands = deal_hands(&self.pool, self.config.hand_size, &mut self.rng)?;
        self.start_with_hands(hands)
    }

    /// Start with predetermined hands instead of a random deal.
    ///
    /// Each hand must hold exactly the configured number of cards. The last
    /// card of a hand is played first.
    pub fn start_with_hands(&mut self, hands: DealtHands) -> Result<(), EngineError> {
        self.ensure_ready()?;
        if let Some((_, hand)) = hands.iter().find(|(_, h)| h.len() != self.config.hand_size) {
            return Err(EngineError::InvalidHandSize(hand.len()));
        }

        for (side, hand) in hands {
            let participant = &mut self.participants[side];
            participant.assign_hand(hand);
            participant.derive_initial_stats();
        }
        self.timer.reset(self.rules.stage_seconds);
        self.status = StageStatus::Running;

        let (player, enemy) = (&self.participants[Side::Player], &self.participants[Side::Enemy]);
        log::info!(
            "stage {} started: {} hp {} atk {} def {} | {} hp {} atk {} def {}",
            self.number,
            player.name(),
            player.hp(),
            player.attack(),
            player.defense(),
            enemy.name(),
            enemy.hp(),
            enemy.attack(),
            enemy.defense()
        );
        Ok(())
    }

    /// Play one round, then run the win check.
    ///
    /// Returns `Ok(None)` once the stage is finished.
    pub fn play_round(&mut self) -> Result<Option<RoundOutcome>, EngineError> {
        match self.status {
            StageStatus::Ready => return Err(EngineError::NotDealt),
            StageStatus::Finished(_) => return Ok(None),
            StageStatus::Running => {}
        }

        let outcome = resolve_round(
            &mut self.participants,
            &mut self.shield_active,
            &mut self.rng,
            &self.rules,
        )?;
        // Both hands empty: nothing happened, nothing to record
        if outcome.cards.iter().any(|(_, card)| card.is_some()) {
            self.history.push(RoundRecord {
                round: self.history.len() as u32 + 1,
                outcome: outcome.clone(),
            });
        }

        self.check_winner();
        Ok(Some(outcome))
    }

    /// Use a one-shot bonus. Each is available once per stage.
    pub fn activate_bonus(&mut self, bonus: Bonus) -> Result<BonusEffect, EngineError> {
        match self.status {
            StageStatus::Ready => return Err(EngineError::NotDealt),
            StageStatus::Finished(_) => return Err(EngineError::StageFinished),
            StageStatus::Running => {}
        }

        match bonus {
            Bonus::Heal => {
                if !self.heal_available {
                    return Err(EngineError::BonusUnavailable(bonus));
                }
                let player = &mut self.participants[Side::Player];
                let ratio = i64::from(self.rules.heal_ratio_percent);
                // Rounded half away from zero; hp_lost is never negative.
                let amount = (player.hp_lost() * ratio + 50) / 100;
                let hp = player.heal(amount);
                self.heal_available = false;

                log::info!("{} heals {} hp, now at {}", player.name(), amount, hp);
                Ok(BonusEffect::Healed { amount, hp })
            }
            Bonus::Shield => {
                if !self.shield_available {
                    return Err(EngineError::BonusUnavailable(bonus));
                }
                self.shield_available = false;
                self.shield_active = true;

                log::info!("{} raises the shield", self.participants[Side::Player].name());
                Ok(BonusEffect::ShieldRaised)
            }
        }
    }

    /// Presentation tick: feed elapsed time to the clock, then check for a win.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Verdict> {
        if self.status == StageStatus::Running {
            let ticked = self.timer.advance(elapsed);
            if ticked > 0 {
                log::debug!("stage {}: {}s left", self.number, self.timer.seconds_left());
            }
        }
        self.check_winner()
    }

    /// Apply the win rules. Finishes the stage on the first match.
    ///
    /// Safe to call at any time; a finished stage keeps its verdict.
    pub fn check_winner(&mut self) -> Option<Verdict> {
        match self.status {
            StageStatus::Ready => return None,
            StageStatus::Finished(verdict) => return Some(verdict),
            StageStatus::Running => {}
        }

        let view = ArbiterView {
            hp: self.participants.map(|_, p| p.hp()),
            cards_left: self.participants.map(|_, p| p.cards_left()),
            seconds_left: self.timer.seconds_left(),
        };
        let verdict = arbitrate(&view)?;

        match verdict.result {
            GameResult::Winner(side) => {
                let time_bonus = u64::from(self.timer.seconds_left());
                let winner = &mut self.participants[side];
                winner.add_score(time_bonus);
                log::info!(
                    "stage {} won by {} ({:?}), +{} time bonus, final score {}",
                    self.number,
                    winner.name(),
                    verdict.rule,
                    time_bonus,
                    winner.score()
                );
            }
            GameResult::Draw => {
                log::info!("stage {} ends in a draw at {} hp each", self.number, view.hp[Side::Player]);
            }
        }

        self.status = StageStatus::Finished(verdict);
        Some(verdict)
    }

    /// Consume this stage and deal a new one for the same level.
    ///
    /// Level, configuration, card pool, names and the random stream carry
    /// over. Scores, hands, bonuses and the clock start from scratch.
    pub fn restart(self) -> Result<Stage, EngineError> {
        let names = self.participants.map(|_, p| p.name().to_string());
        log::info!("stage {} restarted", self.number);

        let mut stage = Self::fresh(self.number, self.config, self.rules, self.pool, names, self.rng);
        stage.deal_and_start()?;
        Ok(stage)
    }

    /// Record a critical hit at `now_ms` for the effect window.
    pub fn mark_critical(&mut self, now_ms: u64) {
        self.last_critical_ms = Some(now_ms);
    }

    /// Is the critical-hit effect still showing at `now_ms`?
    #[must_use]
    pub fn critical_effect_active(&self, now_ms: u64) -> bool {
        self.last_critical_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < self.rules.critical_effect_ms)
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        match self.status {
            StageStatus::Ready => Ok(()),
            StageStatus::Running => Err(EngineError::AlreadyDealt),
            StageStatus::Finished(_) => Err(EngineError::StageFinished),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn status(&self) -> StageStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == StageStatus::Running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, StageStatus::Finished(_))
    }

    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        match self.status {
            StageStatus::Finished(verdict) => Some(verdict),
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.verdict().map(|v| v.result)
    }

    /// The winning participant. `None` while running and after a draw.
    #[must_use]
    pub fn winner(&self) -> Option<&Participant> {
        let side = self.result()?.winner()?;
        Some(&self.participants[side])
    }

    #[must_use]
    pub fn participant(&self, side: Side) -> &Participant {
        &self.participants[side]
    }

    #[must_use]
    pub fn participants(&self) -> &SideMap<Participant> {
        &self.participants
    }

    #[must_use]
    pub fn hp(&self, side: Side) -> i64 {
        self.participants[side].hp()
    }

    #[must_use]
    pub fn attack(&self, side: Side) -> i64 {
        self.participants[side].attack()
    }

    #[must_use]
    pub fn defense(&self, side: Side) -> i64 {
        self.participants[side].defense()
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u64 {
        self.participants[side].score()
    }

    #[must_use]
    pub fn cards_left(&self, side: Side) -> usize {
        self.participants[side].cards_left()
    }

    /// Does either side still hold a card?
    #[must_use]
    pub fn anyone_has_cards(&self) -> bool {
        self.participants.iter().any(|(_, p)| p.has_cards())
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.timer.seconds_left()
    }

    #[must_use]
    pub fn heal_available(&self) -> bool {
        self.heal_available
    }

    #[must_use]
    pub fn shield_available(&self) -> bool {
        self.shield_available
    }

    #[must_use]
    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    #[must_use]
    pub fn pool(&self) -> &[Card] {
        &self.pool
    }

    #[must_use]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}
