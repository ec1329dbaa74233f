// Property-based tests for the numeric rules of the engine
use card_duel::battle::{compute_damage, deal_hands, resolve_round, Participant};
use card_duel::cards::{star_bonus, Card, CardId};
use card_duel::core::{Anchors, GameRng, RulesConfig, Side, SideMap};
use proptest::prelude::*;

fn card(id: &str, atk: u32, def: u32, hp: u32, stars: u32) -> Card {
    Card::new(CardId::new(id), atk, def, hp, stars)
}

proptest! {
    #[test]
    fn proptest_star_bonus_is_floor(base in 0u32..1_000_000, stars in 0u32..200) {
        let bonus = star_bonus(base, stars);
        let exact = f64::from(base) * (1.0 + f64::from(stars) / 100.0);
        prop_assert!(bonus as f64 <= exact + 1e-6);
        prop_assert!(exact - (bonus as f64) < 1.0 + 1e-6);
        prop_assert_eq!(star_bonus(base, 0), i64::from(base));
    }

    #[test]
    fn proptest_damage_is_scaled_difference(
        atk in 0u32..10_000, def in 0u32..10_000,
        atk_stars in 0u32..20, def_stars in 0u32..20,
        multiplier in 1i64..10
    ) {
        let attacker = card("a", atk, 0, 0, atk_stars);
        let defender = card("d", 0, def, 0, def_stars);
        let damage = compute_damage(&attacker, &defender, multiplier);
        prop_assert_eq!(damage, (star_bonus(atk, atk_stars) - star_bonus(def, def_stars)) * multiplier);
        prop_assert_eq!(damage < 0, star_bonus(def, def_stars) > star_bonus(atk, atk_stars));
    }

    #[test]
    fn proptest_deal_is_disjoint(pool_size in 2usize..40, seed in any::<u64>()) {
        let pool: Vec<Card> = (0..pool_size).map(|i| card(&format!("c{}", i), 1, 1, 1, 0)).collect();
        let hand_size = pool_size / 2;
        let hands = deal_hands(&pool, hand_size, &mut GameRng::new(seed)).unwrap();

        let mut ids: Vec<&str> = hands[Side::Player]
            .iter()
            .chain(hands[Side::Enemy].iter())
            .map(|c| c.id().as_str())
            .collect();
        prop_assert_eq!(ids.len(), hand_size * 2);
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), hand_size * 2);
    }

    #[test]
    fn proptest_round_keeps_hp_and_score_sane(
        p_atk in 0u32..2_000, p_def in 0u32..2_000,
        e_atk in 0u32..2_000, e_def in 0u32..2_000,
        seed in any::<u64>(), shield in any::<bool>()
    ) {
        let mut sides = SideMap::new(|side| Participant::new(side.to_string(), side, Anchors::default_for(side)));
        sides[Side::Player].assign_hand(vec![card("p", p_atk, p_def, 500, 0)]);
        sides[Side::Enemy].assign_hand(vec![card("e", e_atk, e_def, 500, 0)]);
        for (_, participant) in sides.iter_mut() {
            participant.derive_initial_stats();
        }

        let mut shield_active = shield;
        let outcome = resolve_round(&mut sides, &mut shield_active, &mut GameRng::new(seed), &RulesConfig::default()).unwrap();

        for side in Side::BOTH {
            let expected = if outcome.damaged == Some(side) {
                (500 - outcome.damage).max(0)
            } else {
                500
            };
            prop_assert_eq!(sides[side].hp(), expected);
            prop_assert!(sides[side].cards_accounted_for());
        }
        prop_assert!(outcome.winner.is_some());
        prop_assert_eq!(outcome.score_awarded, sides[Side::Player].score());
        if outcome.reflected {
            prop_assert!(shield && !shield_active);
            prop_assert_eq!(sides[Side::Player].hp(), 500);
        }
    }
}
