//! Core game types: grid geometry, phase and round state, RNG, configuration.
//!
//! Nothing here knows about rendering, audio or time; the engine combines
//! these pieces with the clock and the collaborators.

pub mod config;
pub mod grid;
pub mod rng;
pub mod state;

pub use config::{GameConfig, Pace};
pub use grid::{
    grid_size_for_level, CellId, CellSpec, Color, GridLayout, DEFAULT_PALETTE, MAX_GRID_SIZE,
    MIN_GRID_SIZE,
};
pub use rng::GameRng;
pub use state::{Phase, ResumePhase, RoundState};
