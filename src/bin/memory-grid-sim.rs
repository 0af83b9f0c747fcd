//! Headless simulator: plays games with a seeded bot against the virtual clock.
//!
//! ```text
//! RUST_LOG=memory_grid=debug memory-grid-sim --games 3 --accuracy 0.95 --scores-dir ./scores
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use memory_grid::core::{CellId, GameConfig, GameRng, Phase};
use memory_grid::engine::{EngineBuilder, InputOutcome, RoundEngine};
use memory_grid::frontend::{SilentAudio, TracingPresenter};
use memory_grid::scores::{ranked, FileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Parser)]
#[command(name = "memory-grid-sim", about = "Play memory-grid games with a simulated player")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 5)]
    games: u32,

    /// Seed for both the sequence and the bot
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Probability of picking the right cell on each input
    #[arg(long, default_value_t = 0.97)]
    accuracy: f64,

    /// Virtual thinking time before each input
    #[arg(long, default_value_t = 350)]
    think_ms: u64,

    /// Restart once the bot reaches this level
    #[arg(long, default_value_t = 30)]
    max_level: u32,

    /// Directory for the persisted leaderboard (in memory when omitted)
    #[arg(long)]
    scores_dir: Option<PathBuf>,

    /// JSON file overriding the default game config
    #[arg(long)]
    config: Option<PathBuf>,
}

type Engine<S> = RoundEngine<TracingPresenter, SilentAudio, S>;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    match &args.scores_dir {
        Some(dir) => run(&args, config, FileStore::new(dir)),
        None => run(&args, config, MemoryStore::new()),
    }
}

fn run<S: KeyValueStore>(args: &Args, config: GameConfig, store: S) -> Result<(), Box<dyn Error>> {
    let mut engine = EngineBuilder::new()
        .config(config)
        .seed(args.seed)
        .build(TracingPresenter, SilentAudio, store)?;
    let mut bot = GameRng::new(args.seed).fork();

    for game in 1..=args.games {
        engine.start();
        play_one(&mut engine, &mut bot, args);

        let Some(report) = engine.report().cloned() else {
            continue;
        };
        info!(
            game,
            reason = %report.reason,
            score = report.final_score,
            virtual_ms = engine.now_ms(),
            "game finished"
        );
        if report.awaiting_name {
            engine.save_score(&format!("bot{}", game));
        }
    }

    println!("Leaderboard:");
    let rows = ranked(&engine.leaderboard());
    if rows.is_empty() {
        println!("  (no records)");
    }
    for row in rows {
        println!("  {}", row);
    }
    Ok(())
}

fn play_one<S: KeyValueStore>(engine: &mut Engine<S>, bot: &mut GameRng, args: &Args) {
    loop {
        match engine.phase() {
            Phase::Idle | Phase::GameOver => return,
            Phase::Showing | Phase::Paused(_) => {
                if !engine.run_next() {
                    return;
                }
            }
            Phase::Input => {
                engine.advance(args.think_ms);
                if engine.phase() != Phase::Input {
                    continue;
                }
                let cell = pick_cell(engine, bot, args.accuracy);
                if let InputOutcome::RoundWon { next_level, .. } = engine.select_cell(cell) {
                    if next_level > args.max_level {
                        engine.restart();
                        return;
                    }
                }
            }
        }
    }
}

/// The expected cell with probability `accuracy`, otherwise some other cell.
fn pick_cell<S: KeyValueStore>(engine: &Engine<S>, bot: &mut GameRng, accuracy: f64) -> CellId {
    let round = engine.round();
    let expected = round.expected().unwrap_or(CellId(0));
    let count = round.cell_count();
    if count < 2 || bot.gen_bool(accuracy) {
        return expected;
    }
    let mut index = bot.gen_index(count - 1);
    if index >= expected.index() {
        index += 1;
    }
    CellId(index as u16)
}
