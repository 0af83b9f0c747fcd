//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use memory_grid::core::{CellId, GameConfig, Phase};
use memory_grid::engine::{EngineBuilder, InputOutcome, RoundEngine};
use memory_grid::frontend::{RecordingAudio, RecordingPresenter};
use memory_grid::scores::{LeaderboardEntry, MemoryStore};

pub type TestEngine = RoundEngine<RecordingPresenter, RecordingAudio, MemoryStore>;

pub const SCORES_KEY: &str = "memoryGameScores";

/// Idle engine with default config and an empty leaderboard.
pub fn engine(seed: u64) -> TestEngine {
    engine_with_store(seed, MemoryStore::new())
}

pub fn engine_with_store(seed: u64, store: MemoryStore) -> TestEngine {
    EngineBuilder::new()
        .seed(seed)
        .build(RecordingPresenter::new(), RecordingAudio::new(), store)
        .unwrap()
}

pub fn engine_with_config(seed: u64, config: GameConfig) -> TestEngine {
    EngineBuilder::new()
        .seed(seed)
        .config(config)
        .build(RecordingPresenter::new(), RecordingAudio::new(), MemoryStore::new())
        .unwrap()
}

/// Store pre-loaded with a leaderboard.
pub fn store_with(entries: &[(&str, u64)]) -> MemoryStore {
    let list: Vec<_> = entries
        .iter()
        .map(|(name, score)| LeaderboardEntry::new(*name, *score))
        .collect();
    MemoryStore::new().with_value(SCORES_KEY, serde_json::to_string(&list).unwrap())
}

/// Fire scheduled wakeups until the engine accepts input.
pub fn run_until_input(engine: &mut TestEngine) {
    for _ in 0..10_000 {
        if engine.phase() == Phase::Input {
            return;
        }
        assert!(engine.run_next(), "clock ran dry in phase {}", engine.phase());
    }
    panic!("engine never reached input");
}

/// Wait for input, then repeat the whole sequence correctly.
pub fn play_round(engine: &mut TestEngine) -> InputOutcome {
    run_until_input(engine);
    let sequence: Vec<CellId> = engine.round().sequence().iter().copied().collect();
    let mut outcome = InputOutcome::Ignored;
    for cell in sequence {
        outcome = engine.select_cell(cell);
    }
    outcome
}

/// Any cell on the current board other than the expected one.
pub fn wrong_cell(engine: &TestEngine) -> CellId {
    let expected = engine.round().expected().unwrap();
    CellId(((expected.index() + 1) % engine.round().cell_count()) as u16)
}

/// Start a game and lose it at the first input with a wrong cell.
pub fn lose_after_rounds(engine: &mut TestEngine, rounds_won: usize) {
    engine.start();
    for _ in 0..rounds_won {
        play_round(engine);
    }
    run_until_input(engine);
    let cell = wrong_cell(engine);
    engine.select_cell(cell);
}
