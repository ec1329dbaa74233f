//! Deck builder: pool assembly and dealing.
//!
//! Both named decks go into one shared pool. Either side may be dealt cards
//! from either deck; the pool is not split by side.

use crate::cards::{Card, DeckCatalog};
use crate::core::config::StageConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::core::side::SideMap;

/// The two hands produced by a deal.
pub type DealtHands = SideMap<Vec<Card>>;

/// Concatenate the player's and the enemy's deck into one face-down pool.
///
/// Fails with a configuration error when either deck is unknown.
pub fn build_full_pool(
    catalog: &DeckCatalog,
    player_deck: &str,
    enemy_deck: &str,
) -> Result<Vec<Card>, EngineError> {
    let player = catalog.deck(player_deck)?;
    let enemy = catalog.deck(enemy_deck)?;

    Ok(player
        .cards
        .iter()
        .chain(enemy.cards.iter())
        .map(Card::from_record)
        .collect())
}

/// Build the pool named by a stage configuration.
pub fn pool_for(catalog: &DeckCatalog, config: &StageConfig) -> Result<Vec<Card>, EngineError> {
    build_full_pool(catalog, &config.player_deck, &config.enemy_deck)
}

/// Check that a pool can supply two disjoint hands of `hand_size` cards.
pub fn check_pool(pool_len: usize, hand_size: usize) -> Result<(), EngineError> {
    if hand_size == 0 {
        return Err(EngineError::InvalidHandSize(hand_size));
    }
    let required = hand_size
        .checked_mul(2)
        .ok_or(EngineError::InvalidHandSize(hand_size))?;
    if pool_len < required {
        return Err(EngineError::PoolTooSmall {
            required,
            available: pool_len,
        });
    }
    Ok(())
}

/// Shuffle the pool, then sample two disjoint hands of `hand_size` cards,
/// the player's first and the enemy's from what remains.
///
/// The pool itself is left untouched so the stage can be dealt again.
pub fn deal_hands(
    pool: &[Card],
    hand_size: usize,
    rng: &mut GameRng,
) -> Result<DealtHands, EngineError> {
    check_pool(pool.len(), hand_size)?;

    let mut shuffled: Vec<Card> = pool.to_vec();
    rng.shuffle(&mut shuffled);

    let player = take_sample(&mut shuffled, hand_size, rng)?;
    let enemy = take_sample(&mut shuffled, hand_size, rng)?;

    log::debug!(
        "dealt {} cards each, {} left in pool",
        hand_size,
        shuffled.len()
    );
    Ok(SideMap::from_pair(player, enemy))
}

/// Remove `amount` randomly chosen cards from `cards`, in sample order.
fn take_sample(
    cards: &mut Vec<Card>,
    amount: usize,
    rng: &mut GameRng,
) -> Result<Vec<Card>, EngineError> {
    let indices = rng
        .sample_indices(cards.len(), amount)
        .ok_or(EngineError::PoolTooSmall {
            required: amount,
            available: cards.len(),
        })?;

    let mut picked = vec![false; cards.len()];
    for &i in &indices {
        picked[i] = true;
    }
    let taken = indices.iter().map(|&i| cards[i].clone()).collect();

    let mut position = 0;
    cards.retain(|_| {
        let keep = !picked[position];
        position += 1;
        keep
    });

    Ok(taken)
}
