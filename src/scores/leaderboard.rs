//! Top-N leaderboard persisted as JSON in a [`KeyValueStore`].
//!
//! ## Storage format
//!
//! A JSON array of `{"name": string, "score": integer}` sorted by descending
//! score. Anything else under the key (missing, truncated, wrong shape) reads
//! as an empty board and is overwritten by the next save.
//!
//! ## Qualification
//!
//! A score qualifies when it is non-zero and either the board has a free
//! slot or the score beats the lowest kept entry. Ties with the lowest entry
//! do not qualify.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::KeyValueStore;

/// One saved score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Podium marker for the first three places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based rank.
    #[must_use]
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        }
    }
}

/// Leaderboard row as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub medal: Option<Medal>,
    pub name: String,
    pub score: u64,
}

impl std::fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.medal {
            Some(medal) => write!(f, "{} {} {} pts", medal.symbol(), self.name, self.score),
            None => write!(f, "{}. {} {} pts", self.rank, self.name, self.score),
        }
    }
}

/// Attach ranks and medals to entries already in display order.
#[must_use]
pub fn ranked(entries: &[LeaderboardEntry]) -> Vec<RankedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            medal: Medal::for_rank(i + 1),
            name: entry.name.clone(),
            score: entry.score,
        })
        .collect()
}

/// Leaderboard over a key-value backend.
#[derive(Clone, Debug)]
pub struct LeaderboardStore<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> LeaderboardStore<S> {
    pub fn new(store: S, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The backing store.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Current entries, best first. Never fails: unreadable data is empty.
    #[must_use]
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "leaderboard read failed, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
            Ok(mut entries) => {
                self.normalize(&mut entries);
                entries
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "corrupt leaderboard data, treating as empty");
                Vec::new()
            }
        }
    }

    /// Whether `score` would earn a place.
    #[must_use]
    pub fn is_highscore(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.load();
        if entries.len() < self.capacity {
            return true;
        }
        entries.last().map_or(true, |lowest| score > lowest.score)
    }

    /// Insert a score, keep the best `capacity`, persist, and return the board.
    ///
    /// A failed write is logged; the returned board reflects the insert either way.
    pub fn record(&mut self, name: impl Into<String>, score: u64) -> Vec<LeaderboardEntry> {
        let mut entries = self.load();
        entries.push(LeaderboardEntry::new(name, score));
        self.normalize(&mut entries);

        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.key, &json) {
                    warn!(key = %self.key, error = %e, "failed to persist leaderboard");
                } else {
                    debug!(key = %self.key, entries = entries.len(), "leaderboard saved");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize leaderboard"),
        }
        entries
    }

    /// Stable sort by descending score, then truncate to capacity.
    fn normalize(&self, entries: &mut Vec<LeaderboardEntry>) {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::scores::MemoryStore;

    const KEY: &str = "memoryGameScores";

    fn board_with(entries: &[(&str, u64)]) -> LeaderboardStore<MemoryStore> {
        let list: Vec<_> = entries
            .iter()
            .map(|(n, s)| LeaderboardEntry::new(*n, *s))
            .collect();
        let json = serde_json::to_string(&list).unwrap();
        LeaderboardStore::new(MemoryStore::new().with_value(KEY, json), KEY, 3)
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let board = LeaderboardStore::new(MemoryStore::new(), KEY, 3);
        assert!(board.load().is_empty());
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        for raw in ["{not json", "null", "42", r#"[{"name":"A"}]"#, r#"[{"name":"A","score":-5}]"#] {
            let board = LeaderboardStore::new(MemoryStore::new().with_value(KEY, raw), KEY, 3);
            assert!(board.load().is_empty(), "raw = {}", raw);
        }
    }

    #[test]
    fn test_reads_name_score_json_list() {
        let raw = r#"[{"name":"ANA","score":120},{"name":"LUIS","score":80}]"#;
        let board = LeaderboardStore::new(MemoryStore::new().with_value(KEY, raw), KEY, 3);
        assert_eq!(
            board.load(),
            vec![LeaderboardEntry::new("ANA", 120), LeaderboardEntry::new("LUIS", 80)]
        );
    }

    #[test]
    fn test_unsorted_oversized_data_is_normalized() {
        let board = board_with(&[("C", 10), ("A", 50), ("D", 5), ("B", 30)]);
        let names: Vec<_> = board.load().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let board = LeaderboardStore::new(MemoryStore::new(), KEY, 3);
        assert!(!board.is_highscore(0));
        assert!(board.is_highscore(1));
    }

    #[test]
    fn test_full_board_needs_to_beat_lowest() {
        let board = board_with(&[("A", 500), ("B", 300), ("C", 100)]);
        assert!(!board.is_highscore(50));
        assert!(!board.is_highscore(100));
        assert!(board.is_highscore(101));
    }

    #[test]
    fn test_record_inserts_sorts_truncates() {
        let mut board = board_with(&[("A", 500), ("B", 300), ("C", 100)]);
        let entries = board.record("NEW", 200);
        assert_eq!(
            entries,
            vec![
                LeaderboardEntry::new("A", 500),
                LeaderboardEntry::new("B", 300),
                LeaderboardEntry::new("NEW", 200),
            ]
        );
        assert_eq!(board.load(), entries);
    }

    #[test]
    fn test_record_overwrites_corrupt_data() {
        let mut board = LeaderboardStore::new(MemoryStore::new().with_value(KEY, "garbage"), KEY, 3);
        board.record("X", 7);
        assert_eq!(board.backend().raw(KEY), Some(r#"[{"name":"X","score":7}]"#));
    }

    #[test]
    fn test_ranked_medals() {
        let entries = vec![
            LeaderboardEntry::new("A", 3),
            LeaderboardEntry::new("B", 2),
            LeaderboardEntry::new("C", 1),
        ];
        let rows = ranked(&entries);
        assert_eq!(rows[0].medal, Some(Medal::Gold));
        assert_eq!(rows[2].medal, Some(Medal::Bronze));
        assert_eq!(rows[1].to_string(), "🥈 B 2 pts");
        assert_eq!(Medal::for_rank(4), None);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_broken_backend_degrades() {
        let mut board = LeaderboardStore::new(BrokenStore, KEY, 3);
        assert!(board.load().is_empty());
        assert!(board.is_highscore(10));
        let entries = board.record("A", 10);
        assert_eq!(entries.len(), 1);
    }
}
