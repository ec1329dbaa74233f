//! Deterministic random number generation for dealing and critical rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical game
//! - **Serializable**: O(1) state capture and restore
//!
//! The engine holds no process-wide random source. Every `Stage` owns a
//! `GameRng`; tests seed it explicitly.
//!
//! ```
//! use card_duel::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut deck_a = vec![1, 2, 3, 4, 5];
//! let mut deck_b = deck_a.clone();
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable RNG used for shuffling, hand sampling and critical rolls.
///
/// Uses ChaCha8 for speed while keeping a reproducible stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a fresh OS-provided seed.
    ///
    /// The chosen seed is still recorded and available via `seed()`,
    /// so an interactive game can be replayed later.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a single uniformly distributed outcome out of `outcomes`.
    ///
    /// Exactly one of the `outcomes` equally likely results is a hit, so
    /// `roll_one_in(4)` succeeds 25% of the time. `outcomes` of 0 or 1
    /// always succeed.
    pub fn roll_one_in(&mut self, outcomes: u32) -> bool {
        if outcomes <= 1 {
            return true;
        }
        self.inner.gen_range(0..outcomes) == outcomes - 1
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Sample `amount` distinct indices from `0..length` without replacement.
    ///
    /// Returns `None` when `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > length {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.inner, length, amount).into_vec())
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
