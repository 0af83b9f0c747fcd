//! # memory-grid
//!
//! Round engine for a Simon-says style memory game: the board flashes a
//! growing sequence of cells, the player repeats it against a countdown, and
//! the board grows from 2×2 to 6×6 as levels go up.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: sequence, level, score and timers live in one
//!    [`RoundEngine`] value. No globals.
//!
//! 2. **Virtual time**: every delay is a wakeup on a [`VirtualClock`]. Hosts
//!    advance the clock; tests drive it deterministically.
//!
//! 3. **Collaborators behind traits**: rendering ([`Presenter`]), sound
//!    ([`TonePlayer`]) and persistence ([`KeyValueStore`]) are supplied by the
//!    host platform.
//!
//! 4. **Graceful degradation**: corrupt scores read as empty, blocked audio
//!    means silence. Nothing the player does can put the engine in an error
//!    state.
//!
//! ## Modules
//!
//! - `core`: grid geometry, phase/round state, RNG, configuration
//! - `timing`: virtual clock and round countdown
//! - `frontend`: presenter and tone-player traits plus reference implementations
//! - `scores`: key-value stores and the top-3 leaderboard
//! - `engine`: the round state machine

pub mod core;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod scores;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{
    grid_size_for_level, CellId, Color, GameConfig, GameRng, GridLayout, Phase, ResumePhase,
    RoundState,
};

pub use crate::engine::{Command, EndReason, EngineBuilder, GameOverReport, InputOutcome, RoundEngine};

pub use crate::error::{AudioError, ConfigError, StorageError};

pub use crate::frontend::{Overlay, Presenter, TimerIndicator, Tone, TonePlayer, Waveform};

pub use crate::scores::{
    FileStore, KeyValueStore, LeaderboardEntry, LeaderboardStore, MemoryStore, RankedEntry,
};

pub use crate::timing::{Countdown, VirtualClock};
