//! The round engine state machine.
//!
//! ## Example
//!
//! ```
//! use memory_grid::core::Phase;
//! use memory_grid::engine::{EngineBuilder, InputOutcome};
//! use memory_grid::frontend::{RecordingAudio, RecordingPresenter};
//! use memory_grid::scores::MemoryStore;
//!
//! let mut engine = EngineBuilder::new()
//!     .seed(42)
//!     .build(RecordingPresenter::new(), RecordingAudio::new(), MemoryStore::new())
//!     .unwrap();
//!
//! engine.start();
//! assert_eq!(engine.phase(), Phase::Showing);
//!
//! // Let the one-element sequence play out.
//! while engine.phase() != Phase::Input {
//!     engine.run_next();
//! }
//!
//! let cell = engine.round().sequence()[0];
//! let outcome = engine.select_cell(cell);
//! assert!(matches!(outcome, InputOutcome::RoundWon { next_level: 2, .. }));
//! ```

mod outcome;
mod playback;
mod round;

pub use outcome::{Command, EndReason, GameOverReport, InputOutcome};
pub use round::{EngineBuilder, RoundEngine};
