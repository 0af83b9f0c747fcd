//! Round engine: the game's state machine and its public command surface.
//!
//! ## Flow
//!
//! ```text
//! Idle ──start──▶ Showing ──playback done──▶ Input ──last cell──▶ Showing ...
//!                    │                         │
//!                    └──pause──▶ Paused ◀──pause┘      wrong cell / timeout / restart
//!                                                        ──▶ GameOver ──start──▶ Showing
//! ```
//!
//! The engine owns every timer. Hosts feed it input and commands, and call
//! [`RoundEngine::advance`] to move virtual time.

use tracing::{debug, info, warn};

use super::outcome::{Command, EndReason, GameOverReport, InputOutcome};
use super::playback::{ChainStep, ShowStage, Wakeup};
use crate::core::{
    CellId, GameConfig, GameRng, Phase, ResumePhase, RoundState, MIN_GRID_SIZE,
};
use crate::error::ConfigError;
use crate::frontend::{Overlay, Presenter, Tone, TonePlayer};
use crate::scores::{ranked, KeyValueStore, LeaderboardEntry, LeaderboardStore};
use crate::timing::{Countdown, VirtualClock};

/// Builder for [`RoundEngine`].
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    config: GameConfig,
    seed: u64,
    sound_on: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            seed: 0,
            sound_on: true,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for the sequence RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Initial sound setting (on by default).
    pub fn sound(mut self, on: bool) -> Self {
        self.sound_on = on;
        self
    }

    /// Validate the config and build an idle engine with a 2×2 board rendered.
    pub fn build<P, A, S>(
        self,
        presenter: P,
        audio: A,
        store: S,
    ) -> Result<RoundEngine<P, A, S>, ConfigError>
    where
        P: Presenter,
        A: TonePlayer,
        S: KeyValueStore,
    {
        self.config.validate()?;

        let scores = LeaderboardStore::new(
            store,
            self.config.leaderboard_key.clone(),
            self.config.leaderboard_capacity,
        );
        let countdown = Countdown::new(self.config.tick_ms);

        let mut engine = RoundEngine {
            config: self.config,
            presenter,
            audio,
            scores,
            rng: GameRng::new(self.seed),
            clock: VirtualClock::new(),
            countdown,
            round: RoundState::new(),
            phase: Phase::Idle,
            stage: ShowStage::None,
            chain_epoch: 0,
            grid_epoch: 0,
            lit_cell: None,
            sound_on: self.sound_on,
            audio_ready: false,
            report: None,
        };

        engine.rebuild_grid(MIN_GRID_SIZE);
        engine.presenter.update_stats(1, 0);
        engine.presenter.set_restart_enabled(false);
        engine.presenter.set_sound_on(engine.sound_on);
        Ok(engine)
    }
}

/// The game's state machine.
///
/// Generic over its three collaborators so tests can inspect recording
/// implementations through [`presenter`](Self::presenter) and
/// [`audio`](Self::audio).
pub struct RoundEngine<P, A, S> {
    pub(super) config: GameConfig,
    pub(super) presenter: P,
    pub(super) audio: A,
    pub(super) scores: LeaderboardStore<S>,
    pub(super) rng: GameRng,
    pub(super) clock: VirtualClock<Wakeup>,
    pub(super) countdown: Countdown,
    pub(super) round: RoundState,
    pub(super) phase: Phase,
    /// Where the Showing phase is; survives pause so resume knows what to redo.
    pub(super) stage: ShowStage,
    /// Bumped whenever pending playback continuations must be dropped.
    pub(super) chain_epoch: u64,
    /// Bumped on every board rebuild.
    pub(super) grid_epoch: u64,
    /// Cell lit by playback (not by input flashes).
    pub(super) lit_cell: Option<CellId>,
    pub(super) sound_on: bool,
    pub(super) audio_ready: bool,
    pub(super) report: Option<GameOverReport>,
}

impl<P, A, S> RoundEngine<P, A, S>
where
    P: Presenter,
    A: TonePlayer,
    S: KeyValueStore,
{
    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// O(1) copy of the round state.
    #[must_use]
    pub fn snapshot(&self) -> RoundState {
        self.round.clone()
    }

    /// Remaining input time; frozen while paused, zero after a timeout.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    /// Input time budget of the current (or last) round.
    #[must_use]
    pub fn time_budget_ms(&self) -> u64 {
        self.countdown.total_ms()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    #[must_use]
    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    /// Whether the tone player initialised successfully.
    #[must_use]
    pub fn audio_ready(&self) -> bool {
        self.audio_ready
    }

    /// How the last game ended, once one has.
    #[must_use]
    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn scores(&self) -> &LeaderboardStore<S> {
        &self.scores
    }

    /// Current leaderboard, best first.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.scores.load()
    }

    // === Time ===

    /// Move virtual time forward, firing everything that falls due in order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.now_ms().saturating_add(ms);
        while let Some(wakeup) = self.clock.pop_due(target) {
            self.dispatch(wakeup);
        }
        self.clock.advance_to(target);
    }

    /// Jump straight to the next scheduled wakeup and fire it.
    ///
    /// Returns `false` when nothing is scheduled.
    pub fn run_next(&mut self) -> bool {
        match self.clock.pop_next() {
            Some(wakeup) => {
                self.dispatch(wakeup);
                true
            }
            None => false,
        }
    }

    /// Milliseconds until the next scheduled wakeup.
    #[must_use]
    pub fn next_wakeup_in(&self) -> Option<u64> {
        self.clock
            .next_due_ms()
            .map(|due| due.saturating_sub(self.clock.now_ms()))
    }

    // === Commands ===

    /// Route a command. Selections report their outcome via [`select_cell`](Self::select_cell).
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
            Command::ToggleSound => self.toggle_sound(),
            Command::SaveScore(name) => {
                self.save_score(&name);
            }
            Command::DismissLeaderboard => {
                self.dismiss_leaderboard();
            }
            Command::Select(cell) => {
                self.select_cell(cell);
            }
        }
    }

    /// Start a new game from Idle or GameOver; resumes when paused.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Paused(_) => {
                self.toggle_pause();
                return;
            }
            Phase::Showing | Phase::Input => {
                debug!(phase = %self.phase, "start ignored, a game is running");
                return;
            }
            Phase::Idle | Phase::GameOver => {}
        }

        self.init_audio();
        self.countdown.stop();
        self.invalidate_chain();
        self.clock.clear();
        self.stage = ShowStage::None;
        self.round = RoundState::new();
        self.report = None;

        self.presenter.update_stats(self.round.level(), self.round.score());
        self.presenter.set_restart_enabled(true);
        self.rebuild_grid(MIN_GRID_SIZE);
        self.presenter.hide_overlay();

        info!(seed = self.rng.seed(), "game started");
        self.next_round();
    }

    /// Pause or resume. No-op from Idle and GameOver.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                debug!(phase = %self.phase, "pause ignored");
            }
            Phase::Showing => self.pause(ResumePhase::Showing),
            Phase::Input => self.pause(ResumePhase::Input),
            Phase::Paused(resume) => self.resume(resume),
        }
    }

    /// End the running game with [`EndReason::Restarted`].
    pub fn restart(&mut self) {
        if self.phase.is_active() {
            self.end_game(EndReason::Restarted);
        } else {
            debug!(phase = %self.phase, "restart ignored, no game running");
        }
    }

    /// Flip sound (tones and background music).
    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
        if self.audio_ready {
            self.audio.set_music(self.sound_on);
        }
        self.presenter.set_sound_on(self.sound_on);
        debug!(sound_on = self.sound_on, "sound toggled");
    }

    /// Record the last game's qualifying score under `name` and show the board.
    ///
    /// `None` unless the engine is waiting for a name.
    pub fn save_score(&mut self, name: &str) -> Option<Vec<LeaderboardEntry>> {
        if self.phase != Phase::GameOver {
            return None;
        }
        let report = self.report.as_mut().filter(|r| r.awaiting_name)?;
        report.awaiting_name = false;
        let score = report.final_score;

        let name = self.player_name(name);
        info!(name = %name, score, "high score saved");
        let entries = self.scores.record(name, score);
        self.presenter.show_leaderboard(&ranked(&entries));
        Some(entries)
    }

    /// Skip saving a qualifying score and go straight to the board.
    pub fn dismiss_leaderboard(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        match self.report.as_mut() {
            Some(report) if report.awaiting_name => report.awaiting_name = false,
            _ => return false,
        }
        self.show_leaderboard();
        true
    }

    /// Player activated a cell.
    pub fn select_cell(&mut self, cell: CellId) -> InputOutcome {
        if self.phase != Phase::Input {
            debug!(cell = cell.0, phase = %self.phase, "input ignored");
            return InputOutcome::Ignored;
        }
        if cell.index() >= self.round.cell_count() {
            debug!(cell = cell.0, cells = self.round.cell_count(), "input off the board");
            return InputOutcome::Ignored;
        }

        self.flash_cell(cell);

        if self.round.expected() != Some(cell) {
            self.play_tone(Tone::wrong_cell());
            self.end_game(EndReason::WrongCell);
            return InputOutcome::GameOver(EndReason::WrongCell);
        }

        self.play_tone(Tone::correct_input(cell));
        if !self.round.advance_step() {
            return InputOutcome::Correct {
                step: self.round.player_step(),
                remaining: self.round.steps_remaining(),
            };
        }

        self.countdown.stop();
        let remaining_ms = self.countdown.remaining_ms();
        let gained = self.round.complete_round(remaining_ms);
        self.presenter.update_stats(self.round.level(), self.round.score());
        self.play_tone(Tone::round_won());
        info!(
            level = self.round.level() - 1,
            remaining_ms,
            gained,
            score = self.round.score(),
            "round won"
        );

        self.phase = Phase::Showing;
        self.stage = ShowStage::AwaitingRound;
        self.schedule_chain(self.config.next_round_delay_ms, ChainStep::NextRound);

        InputOutcome::RoundWon {
            gained,
            next_level: self.round.level(),
        }
    }

    // === Internals shared with playback ===

    fn pause(&mut self, resume: ResumePhase) {
        self.countdown.stop();
        self.invalidate_chain();
        self.phase = Phase::Paused(resume);
        self.presenter.show_overlay(&Overlay::paused());
        self.presenter.set_paused(true);
        debug!(?resume, remaining_ms = self.countdown.remaining_ms(), "paused");
    }

    fn resume(&mut self, resume: ResumePhase) {
        self.phase = resume.into();
        self.presenter.hide_overlay();
        self.presenter.set_paused(false);
        debug!(?resume, remaining_ms = self.countdown.remaining_ms(), "resumed");
        match resume {
            ResumePhase::Input => {
                if self.countdown.resume() {
                    self.arm_countdown_tick();
                }
            }
            ResumePhase::Showing => self.resume_showing(),
        }
    }

    pub(super) fn end_game(&mut self, reason: EndReason) {
        let was_paused = matches!(self.phase, Phase::Paused(_));
        self.countdown.stop();
        self.invalidate_chain();
        self.stage = ShowStage::None;
        self.phase = Phase::GameOver;

        let final_score = self.round.score();
        info!(%reason, score = final_score, level = self.round.level(), "game over");

        if was_paused {
            self.presenter.set_paused(false);
        }
        self.presenter.shake_grid();
        self.presenter
            .show_overlay(&Overlay::game_over(reason.message(), final_score));
        self.presenter.set_restart_enabled(false);

        let qualifies = self.scores.is_highscore(final_score);
        self.report = Some(GameOverReport {
            reason,
            final_score,
            awaiting_name: qualifies,
        });
        if qualifies {
            self.presenter.prompt_player_name();
        } else {
            self.show_leaderboard();
        }
    }

    fn show_leaderboard(&mut self) {
        let entries = self.scores.load();
        self.presenter.show_leaderboard(&ranked(&entries));
    }

    /// Trimmed, upper-cased, placeholder when blank.
    fn player_name(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.config.default_player_name.clone()
        } else {
            trimmed.to_uppercase()
        }
    }

    fn init_audio(&mut self) {
        match self.audio.init() {
            Ok(()) => {
                self.audio_ready = true;
                if self.sound_on {
                    self.audio.set_music(true);
                }
            }
            Err(e) => {
                self.audio_ready = false;
                warn!(error = %e, "audio unavailable, continuing without sound");
            }
        }
    }

    pub(super) fn play_tone(&mut self, tone: Tone) {
        if self.sound_on && self.audio_ready {
            self.audio.play(tone);
        }
    }
}
