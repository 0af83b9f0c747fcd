//! High-score persistence: key-value backends and the top-N leaderboard.

mod leaderboard;
mod store;

pub use leaderboard::{ranked, LeaderboardEntry, LeaderboardStore, Medal, RankedEntry};
pub use store::{FileStore, KeyValueStore, MemoryStore};
