//! Ranking store.
//!
//! A flat text file with one `name,score` line per finished game, under a
//! `name,score` header. Entries are appended as games end and read back as a
//! leaderboard, best score first.

mod store;

pub use store::{RankingEntry, RankingError, RankingStore, HEADER};
