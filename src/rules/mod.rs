//! Win conditions.
//!
//! The arbiter is a pure function over a small view of stage state, so every
//! rule and their priority order can be exercised without dealing a game.

pub mod arbiter;

pub use arbiter::{arbitrate, ArbiterView, GameResult, Verdict, WinRule};
