//! The battle engine.
//!
//! - `participant`: one side's hand, played pile and derived stats
//! - `deck`: pool assembly and dealing of two disjoint hands
//! - `round`: resolution of a single round
//! - `timer`: the stage countdown
//! - `stage`: the controller tying it all together

pub mod deck;
pub mod participant;
pub mod round;
pub mod stage;
pub mod timer;

pub use deck::{build_full_pool, check_pool, deal_hands, pool_for, DealtHands};
pub use participant::{compute_damage, Cards, Participant};
pub use round::{resolve_round, RoundOutcome};
pub use stage::{Bonus, BonusEffect, RoundRecord, Stage, StageStatus};
pub use timer::StageTimer;
