//! Showing-phase continuation chain, countdown ticks and wakeup dispatch.
//!
//! Playback is a chain of scheduled steps: settle, append, lead-in, then
//! light/unlight each element. Every step carries the chain epoch it was
//! scheduled under and only runs if that epoch is still current and the
//! engine is still Showing. Pausing, ending or restarting the game bumps the
//! epoch, which drops the rest of the chain.

use tracing::debug;

use super::outcome::EndReason;
use super::round::RoundEngine;
use crate::core::{grid_size_for_level, CellId, GridLayout, Phase};
use crate::frontend::{Presenter, TimerIndicator, Tone, TonePlayer};
use crate::scores::KeyValueStore;
use crate::timing::CountdownTick;

/// One link of the Showing chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChainStep {
    /// Pacing delay after a won round has elapsed.
    NextRound,
    /// Board rebuilt and settled; append the new step.
    AddStep,
    /// Lead-in elapsed; start presenting from the first element.
    BeginPlayback,
    /// Element `i` has been lit long enough.
    LightOff(usize),
    /// Gap after element `i` elapsed.
    NextElement(usize),
}

/// Everything the engine schedules on its clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Wakeup {
    Chain { epoch: u64, step: ChainStep },
    CountdownTick { generation: u64 },
    FlashOff { cell: CellId, grid_epoch: u64 },
}

/// Progress within the Showing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShowStage {
    None,
    /// Round won, waiting to start the next one.
    AwaitingRound,
    /// Board rebuilt, step not yet appended.
    Settling,
    /// Step appended, playback not yet started.
    Priming,
    /// Presenting the sequence.
    Playing,
}

impl<P, A, S> RoundEngine<P, A, S>
where
    P: Presenter,
    A: TonePlayer,
    S: KeyValueStore,
{
    pub(super) fn dispatch(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::Chain { epoch, step } => {
                if epoch != self.chain_epoch || self.phase != Phase::Showing {
                    debug!(?step, epoch, current = self.chain_epoch, "stale playback step dropped");
                    return;
                }
                match step {
                    ChainStep::NextRound => self.next_round(),
                    ChainStep::AddStep => self.add_step(),
                    ChainStep::BeginPlayback => self.begin_playback(),
                    ChainStep::LightOff(index) => self.light_off(index),
                    ChainStep::NextElement(index) => self.play_element(index),
                }
            }
            Wakeup::CountdownTick { generation } => self.countdown_tick(generation),
            Wakeup::FlashOff { cell, grid_epoch } => {
                if grid_epoch == self.grid_epoch && self.lit_cell != Some(cell) {
                    self.presenter.set_cell_lit(cell, false);
                }
            }
        }
    }

    pub(super) fn schedule_chain(&mut self, delay_ms: u64, step: ChainStep) {
        let epoch = self.chain_epoch;
        self.clock.schedule_in(delay_ms, Wakeup::Chain { epoch, step });
    }

    /// Drop every pending chain step and switch off the playback light.
    ///
    /// `stage` is kept so a resume can pick the chain back up.
    pub(super) fn invalidate_chain(&mut self) {
        self.chain_epoch += 1;
        if let Some(cell) = self.lit_cell.take() {
            self.presenter.set_cell_lit(cell, false);
        }
    }

    pub(super) fn rebuild_grid(&mut self, size: u8) {
        self.round.set_grid_size(size);
        self.grid_epoch += 1;
        self.lit_cell = None;
        self.presenter
            .render_grid(&GridLayout::new(size, &self.config.palette));
        debug!(size, "grid rebuilt");
    }

    /// Top of a round: resize the board if the level demands it, then append.
    pub(super) fn next_round(&mut self) {
        self.round.begin_round();
        self.phase = Phase::Showing;

        let needed = grid_size_for_level(self.round.level());
        if needed != self.round.grid_size() {
            self.rebuild_grid(needed);
            self.stage = ShowStage::Settling;
            self.schedule_chain(self.config.grid_settle_ms, ChainStep::AddStep);
        } else {
            self.add_step();
        }
    }

    fn add_step(&mut self) {
        let cell = CellId(self.rng.gen_index(self.round.cell_count()) as u16);
        self.round.push_step(cell);
        self.presenter
            .update_stats(self.round.level(), self.round.score());
        debug!(
            level = self.round.level(),
            length = self.round.sequence().len(),
            cell = cell.0,
            "sequence extended"
        );

        self.stage = ShowStage::Priming;
        self.schedule_chain(self.config.playback_lead_in_ms, ChainStep::BeginPlayback);
    }

    fn begin_playback(&mut self) {
        self.stage = ShowStage::Playing;
        self.presenter.update_timer(TimerIndicator::full());
        self.play_element(0);
    }

    fn play_element(&mut self, index: usize) {
        let Some(cell) = self.round.sequence().get(index).copied() else {
            self.enter_input();
            return;
        };

        let pace = self.config.playback_pace(self.round.level());
        self.lit_cell = Some(cell);
        self.presenter.set_cell_lit(cell, true);
        self.play_tone(Tone::sequence_cell(cell, pace.on_ms));
        self.schedule_chain(pace.on_ms, ChainStep::LightOff(index));
    }

    fn light_off(&mut self, index: usize) {
        if let Some(cell) = self.lit_cell.take() {
            self.presenter.set_cell_lit(cell, false);
        }
        let pace = self.config.playback_pace(self.round.level());
        self.schedule_chain(pace.off_ms, ChainStep::NextElement(index + 1));
    }

    fn enter_input(&mut self) {
        let budget = self.config.time_budget_ms(self.round.sequence().len());
        self.countdown.start(budget);
        self.stage = ShowStage::None;
        self.phase = Phase::Input;
        self.arm_countdown_tick();
        debug!(budget_ms = budget, level = self.round.level(), "awaiting input");
    }

    /// Re-enter an interrupted Showing phase after a pause.
    ///
    /// The interrupted wait restarts in full; interrupted playback replays
    /// the whole sequence.
    pub(super) fn resume_showing(&mut self) {
        match self.stage {
            ShowStage::AwaitingRound => {
                self.schedule_chain(self.config.next_round_delay_ms, ChainStep::NextRound);
            }
            ShowStage::Settling => {
                self.schedule_chain(self.config.grid_settle_ms, ChainStep::AddStep);
            }
            ShowStage::Priming | ShowStage::Playing | ShowStage::None => {
                self.stage = ShowStage::Priming;
                self.schedule_chain(self.config.playback_lead_in_ms, ChainStep::BeginPlayback);
            }
        }
    }

    pub(super) fn arm_countdown_tick(&mut self) {
        let generation = self.countdown.generation();
        self.clock
            .schedule_in(self.countdown.tick_ms(), Wakeup::CountdownTick { generation });
    }

    fn countdown_tick(&mut self, generation: u64) {
        if self.phase != Phase::Input {
            return;
        }
        match self.countdown.tick(generation) {
            CountdownTick::Stale => {}
            CountdownTick::Running(reading) => {
                self.presenter.update_timer(TimerIndicator::from_reading(
                    reading,
                    self.config.critical_fraction,
                ));
                self.arm_countdown_tick();
            }
            CountdownTick::Expired => {
                self.presenter.update_timer(TimerIndicator::from_reading(
                    self.countdown.reading(),
                    self.config.critical_fraction,
                ));
                self.play_tone(Tone::time_out());
                self.end_game(EndReason::TimedOut);
            }
        }
    }

    /// Brief light-up acknowledging a selection.
    pub(super) fn flash_cell(&mut self, cell: CellId) {
        self.presenter.set_cell_lit(cell, true);
        let grid_epoch = self.grid_epoch;
        self.clock
            .schedule_in(self.config.input_flash_ms, Wakeup::FlashOff { cell, grid_epoch });
    }
}
