//! Stage flow tests.
//!
//! These tests drive whole stages through the public API:
//! - Rounds, damage and score on rigged hands
//! - Win rule priority as seen from a running stage
//! - Bonuses, restarts and seeded determinism

use std::time::Duration;

use card_duel::battle::{Bonus, BonusEffect, Stage, StageStatus};
use card_duel::cards::{Card, CardId, CardRecord, Deck, DeckCatalog};
use card_duel::core::{EngineError, GameRng, RulesConfig, Side, SideMap, StageConfig};
use card_duel::rules::{GameResult, WinRule};

fn card(id: &str, atk: u32, def: u32, hp: u32, stars: u32) -> Card {
    Card::new(CardId::new(id), atk, def, hp, stars)
}

fn catalog() -> DeckCatalog {
    let goku = Deck::new(
        (0..6)
            .map(|i| CardRecord::new(format!("goku_{}", i), 100 + i * 10, 40 + i * 5, 400 + i * 20, i))
            .collect(),
    )
    .with_reverse_art("goku/reverse.png");
    let frieza = Deck::new(
        (0..6)
            .map(|i| CardRecord::new(format!("frieza_{}", i), 90 + i * 15, 30 + i * 5, 380 + i * 25, i))
            .collect(),
    );
    DeckCatalog::new()
        .with_deck("goku", goku)
        .with_deck("frieza", frieza)
}

/// Rules under which a critical hit is as good as impossible.
fn calm_rules() -> RulesConfig {
    RulesConfig::default().with_critical_outcomes(u32::MAX)
}

fn new_stage(hand_size: usize, rules: RulesConfig, seed: u64) -> Stage {
    Stage::initialize(
        1,
        StageConfig::new("goku", "frieza", hand_size),
        rules,
        &catalog(),
        "ASH",
        GameRng::new(seed),
    )
    .expect("valid stage")
}

fn rigged(player: Vec<Card>, enemy: Vec<Card>) -> Stage {
    let mut stage = new_stage(player.len(), calm_rules(), 1);
    stage
        .start_with_hands(SideMap::from_pair(player, enemy))
        .expect("hands match hand size");
    stage
}

/// Test the canonical one-card duel: the player wins the round outright.
#[test]
fn test_one_card_duel() {
    let mut stage = rigged(
        vec![card("hero", 100, 50, 500, 0)],
        vec![card("villain", 80, 40, 500, 0)],
    );

    let outcome = stage.play_round().unwrap().expect("stage was running");
    assert!(!outcome.critical);
    assert_eq!(outcome.winner, Some(Side::Player));
    assert_eq!(outcome.score_awarded, 60);
    assert_eq!(stage.hp(Side::Enemy), 440);
    assert_eq!(stage.hp(Side::Player), 500);

    // Both hands empty, enemy behind on HP: rule 5 decides
    let verdict = stage.verdict().expect("stage decided");
    assert_eq!(verdict.rule, WinRule::OutOfCards(Side::Enemy));
    assert_eq!(stage.winner().map(|p| p.name()), Some("ASH"));
    // Round score plus the full minute as time bonus
    assert_eq!(stage.score(Side::Player), 120);
}

/// Test that the enemy's HP can never go below zero.
#[test]
fn test_hp_floor() {
    let mut stage = rigged(vec![card("hero", 5000, 0, 100, 0)], vec![card("villain", 1, 0, 100, 0)]);
    stage.play_round().unwrap();
    assert_eq!(stage.hp(Side::Enemy), 0);
    assert_eq!(stage.verdict().unwrap().rule, WinRule::KnockedOut(Side::Enemy));
}

/// Test the shield: an enemy win is turned back on the enemy, once.
#[test]
fn test_shield_reflects_once() {
    let mut stage = rigged(
        vec![card("p0", 10, 0, 1000, 0), card("p1", 10, 0, 1000, 0)],
        vec![card("e0", 200, 20, 1000, 0), card("e1", 200, 20, 1000, 0)],
    );

    stage.activate_bonus(Bonus::Shield).unwrap();
    let first = stage.play_round().unwrap().unwrap();
    assert!(first.reflected);
    assert_eq!(first.damaged, Some(Side::Enemy));
    assert_eq!(stage.hp(Side::Enemy), 2000 - 180);
    assert_eq!(stage.hp(Side::Player), 2000);
    assert!(!stage.shield_active());

    let second = stage.play_round().unwrap().unwrap();
    assert!(!second.reflected);
    assert_eq!(second.damaged, Some(Side::Player));
    assert_eq!(stage.hp(Side::Player), 2000 - 200);
}

/// Test that a raised shield survives rounds the player wins.
#[test]
fn test_shield_waits_for_enemy_win() {
    let mut stage = rigged(
        vec![card("p0", 10, 0, 1000, 0), card("p1", 300, 0, 1000, 0)],
        vec![card("e0", 200, 20, 1000, 0), card("e1", 100, 20, 1000, 0)],
    );
    stage.activate_bonus(Bonus::Shield).unwrap();

    stage.play_round().unwrap();
    assert!(stage.shield_active());

    let outcome = stage.play_round().unwrap().unwrap();
    assert!(outcome.reflected);
    assert!(!stage.shield_active());
}

/// Test heal: 75% of the lost HP comes back, and only once.
#[test]
fn test_heal_once() {
    let mut stage = rigged(
        vec![card("p0", 1, 0, 500, 0), card("p1", 1, 0, 500, 0)],
        vec![card("e0", 600, 0, 500, 0), card("e1", 600, 0, 500, 0)],
    );
    stage.play_round().unwrap();
    assert_eq!(stage.hp(Side::Player), 400);

    assert_eq!(
        stage.activate_bonus(Bonus::Heal),
        Ok(BonusEffect::Healed { amount: 450, hp: 850 })
    );
    assert_eq!(
        stage.activate_bonus(Bonus::Heal),
        Err(EngineError::BonusUnavailable(Bonus::Heal))
    );
    assert_eq!(stage.hp(Side::Player), 850);
}

/// Test that knock-out outranks the clock even when both trigger together.
#[test]
fn test_knock_out_beats_time_out() {
    let mut stage = rigged(
        vec![card("p0", 1, 0, 100, 0), card("p1", 1, 0, 100, 0)],
        vec![card("e0", 10, 0, 1000, 0), card("e1", 500, 0, 1000, 0)],
    );
    stage.tick(Duration::from_secs(59));
    assert!(stage.is_running());

    // Knock the player out with one second left, then let the clock run out
    stage.play_round().unwrap();
    stage.tick(Duration::from_secs(5));

    let verdict = stage.verdict().unwrap();
    assert_eq!(verdict.rule, WinRule::KnockedOut(Side::Player));
    assert_eq!(verdict.result, GameResult::Winner(Side::Enemy));
    // The enemy collected the single remaining second
    assert_eq!(stage.score(Side::Enemy), 1);
}

/// Test a time-out with equal HP: a draw with no winner and no bonus.
#[test]
fn test_time_out_draw() {
    let mut stage = rigged(vec![card("p", 10, 10, 300, 0)], vec![card("e", 10, 10, 300, 0)]);
    stage.play_round().unwrap();
    assert!(stage.is_running());
    assert!(!stage.anyone_has_cards());

    for _ in 0..60 {
        stage.tick(Duration::from_secs(1));
    }
    assert_eq!(stage.result(), Some(GameResult::Draw));
    assert!(stage.winner().is_none());
    assert_eq!(stage.score(Side::Player), 0);
}

/// Test a time-out where the player is ahead on HP.
#[test]
fn test_time_out_player_ahead() {
    let mut stage = rigged(
        vec![card("p0", 50, 0, 500, 0), card("p1", 50, 0, 500, 0)],
        vec![card("e0", 10, 0, 500, 0), card("e1", 10, 0, 500, 0)],
    );
    stage.play_round().unwrap();
    stage.tick(Duration::from_secs(60));

    let verdict = stage.verdict().unwrap();
    assert_eq!(verdict.rule, WinRule::TimeExpired);
    assert_eq!(verdict.result, GameResult::Winner(Side::Player));
    // 50 from the round, nothing from the clock
    assert_eq!(stage.score(Side::Player), 50);
}

/// Test the player running out of cards while behind.
#[test]
fn test_player_out_of_cards_and_behind() {
    let mut stage = rigged(vec![card("p", 1, 0, 500, 0)], vec![card("e", 100, 0, 500, 0)]);
    stage.tick(Duration::from_secs(20));
    stage.play_round().unwrap();

    let verdict = stage.verdict().unwrap();
    assert_eq!(verdict.rule, WinRule::OutOfCards(Side::Player));
    assert_eq!(stage.winner().unwrap().side(), Side::Enemy);
    assert_eq!(stage.score(Side::Enemy), 40);
    assert_eq!(stage.score(Side::Player), 0);
}

/// Test star bonuses on both attack and defense in a running stage.
#[test]
fn test_stars_scale_damage() {
    // 200 atk, 10 stars -> 220; 100 def, 10 stars -> 110
    let mut stage = rigged(
        vec![card("p", 200, 0, 1000, 10)],
        vec![card("e", 10, 100, 1000, 10)],
    );
    let outcome = stage.play_round().unwrap().unwrap();
    assert_eq!(outcome.damage, 110);
    assert_eq!(outcome.score_awarded, 120);
    assert_eq!(stage.hp(Side::Enemy), 890);
}

/// Test that every critical multiplies damage when criticals are certain.
#[test]
fn test_certain_critical() {
    let mut stage = new_stage(1, RulesConfig::default().with_critical_outcomes(1), 3);
    stage
        .start_with_hands(SideMap::from_pair(
            vec![card("p", 100, 50, 1000, 0)],
            vec![card("e", 80, 40, 1000, 0)],
        ))
        .unwrap();

    let outcome = stage.play_round().unwrap().unwrap();
    assert!(outcome.critical);
    assert_eq!(outcome.damage, 300);
    assert_eq!(stage.hp(Side::Enemy), 700);
}

/// Test a full random game: it always ends, and card bookkeeping holds.
#[test]
fn test_random_game_terminates() {
    for seed in 0..20 {
        let mut stage = new_stage(4, RulesConfig::default(), seed);
        stage.deal_and_start().unwrap();

        let mut guard = 0;
        while !stage.is_finished() {
            if stage.anyone_has_cards() {
                stage.play_round().unwrap();
            }
            stage.tick(Duration::from_secs(1));
            guard += 1;
            assert!(guard < 100, "seed {} did not finish", seed);
        }

        for side in Side::BOTH {
            assert!(stage.participant(side).cards_accounted_for());
            assert!(stage.hp(side) >= 0);
        }
        assert!(matches!(stage.status(), StageStatus::Finished(_)));
    }
}

/// Test that the same seed replays the same game.
#[test]
fn test_seeded_games_repeat() {
    let play = |seed| {
        let mut stage = new_stage(5, RulesConfig::default(), seed);
        stage.deal_and_start().unwrap();
        while stage.play_round().unwrap().is_some() && stage.anyone_has_cards() {}
        (stage.history().to_vec(), stage.hp(Side::Player), stage.hp(Side::Enemy))
    };

    assert_eq!(play(11), play(11));
}

/// Test restarting a finished stage.
#[test]
fn test_restart() {
    let mut stage = new_stage(3, calm_rules(), 5);
    stage.deal_and_start().unwrap();
    stage.activate_bonus(Bonus::Heal).unwrap();
    while stage.anyone_has_cards() && !stage.is_finished() {
        stage.play_round().unwrap();
    }
    stage.tick(Duration::from_secs(60));
    assert!(stage.is_finished());

    let stage = stage.restart().unwrap();
    assert!(stage.is_running());
    assert_eq!(stage.number(), 1);
    assert_eq!(stage.score(Side::Player), 0);
    assert_eq!(stage.score(Side::Enemy), 0);
    assert_eq!(stage.cards_left(Side::Player), 3);
    assert_eq!(stage.cards_left(Side::Enemy), 3);
    assert!(stage.heal_available());
    assert!(stage.history().is_empty());
    assert_eq!(stage.seconds_left(), 60);
    assert_eq!(stage.participant(Side::Player).name(), "ASH");
}
