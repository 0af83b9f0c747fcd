//! Game phase and per-game round state.
//!
//! ## Phase
//!
//! Exactly one phase is active at a time. `Paused` carries the phase it
//! interrupted so that resuming lands in the same place.
//!
//! ## RoundState
//!
//! Sequence, step, level, score and current board size. Snapshots are cheap:
//! the sequence is an `im::Vector`, so cloning is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::grid::{CellId, MIN_GRID_SIZE};

/// Phase a paused game resumes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResumePhase {
    Showing,
    Input,
}

impl From<ResumePhase> for Phase {
    fn from(resume: ResumePhase) -> Self {
        match resume {
            ResumePhase::Showing => Phase::Showing,
            ResumePhase::Input => Phase::Input,
        }
    }
}

/// Top-level state of the round engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started yet.
    #[default]
    Idle,
    /// The sequence is being extended or played back.
    Showing,
    /// The player is repeating the sequence against the countdown.
    Input,
    /// Frozen; remembers where to resume.
    Paused(ResumePhase),
    /// Ended; waits for a new start.
    GameOver,
}

impl Phase {
    /// Whether a game is in progress (possibly paused).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Showing | Phase::Input | Phase::Paused(_))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Showing => write!(f, "showing"),
            Phase::Input => write!(f, "input"),
            Phase::Paused(ResumePhase::Showing) => write!(f, "paused(showing)"),
            Phase::Paused(ResumePhase::Input) => write!(f, "paused(input)"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Sequence and scoring state of the game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    level: u32,
    score: u64,
    player_step: usize,
    sequence: Vector<CellId>,
    grid_size: u8,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    /// Fresh state: level 1, score 0, empty sequence, 2×2 board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: 1,
            score: 0,
            player_step: 0,
            sequence: Vector::new(),
            grid_size: MIN_GRID_SIZE,
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Index of the next element the player must match.
    #[must_use]
    pub fn player_step(&self) -> usize {
        self.player_step
    }

    #[must_use]
    pub fn sequence(&self) -> &Vector<CellId> {
        &self.sequence
    }

    #[must_use]
    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// Number of cells on the current board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.grid_size) * usize::from(self.grid_size)
    }

    /// The cell the player must select next, if any remain.
    #[must_use]
    pub fn expected(&self) -> Option<CellId> {
        self.sequence.get(self.player_step).copied()
    }

    /// Elements still to be matched this round.
    #[must_use]
    pub fn steps_remaining(&self) -> usize {
        self.sequence.len() - self.player_step
    }

    pub(crate) fn begin_round(&mut self) {
        self.player_step = 0;
    }

    pub(crate) fn set_grid_size(&mut self, size: u8) {
        self.grid_size = size;
    }

    pub(crate) fn push_step(&mut self, cell: CellId) {
        debug_assert!(cell.index() < self.cell_count());
        self.sequence.push_back(cell);
    }

    /// Advance past a correct selection. Returns `true` when the round is complete.
    pub(crate) fn advance_step(&mut self) -> bool {
        if self.player_step < self.sequence.len() {
            self.player_step += 1;
        }
        self.player_step == self.sequence.len()
    }

    /// Credit a won round and move to the next level.
    ///
    /// Gain is `level * 10 + remaining_ms / 100`, using the level before the
    /// increment.
    pub(crate) fn complete_round(&mut self, remaining_ms: u64) -> u64 {
        let gained = (u64::from(self.level) * 10).saturating_add(remaining_ms / 100);
        self.score = self.score.saturating_add(gained);
        self.level = self.level.saturating_add(1);
        gained
    }
}
