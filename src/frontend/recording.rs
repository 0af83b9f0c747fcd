//! Collaborators that record every call, for tests and replay tooling.

use super::audio::{Tone, TonePlayer};
use super::presenter::{Overlay, Presenter, TimerIndicator};
use crate::core::{CellId, GridLayout};
use crate::error::AudioError;
use crate::scores::RankedEntry;

/// One presenter call.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterEvent {
    GridRendered(GridLayout),
    CellLit { cell: CellId, lit: bool },
    Stats { level: u32, score: u64 },
    Timer(TimerIndicator),
    OverlayShown(Overlay),
    OverlayHidden,
    NamePrompted,
    LeaderboardShown(Vec<RankedEntry>),
    GridShaken,
    RestartEnabled(bool),
    Paused(bool),
    SoundOn(bool),
}

/// Presenter that keeps an ordered log of calls.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Drain the log.
    pub fn take_events(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cells switched on, in order.
    #[must_use]
    pub fn lit_cells(&self) -> Vec<CellId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::CellLit { cell, lit: true } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Cells currently lit according to the log.
    #[must_use]
    pub fn currently_lit(&self) -> Vec<CellId> {
        let mut lit: Vec<CellId> = Vec::new();
        for event in &self.events {
            match event {
                PresenterEvent::CellLit { cell, lit: true } => {
                    if !lit.contains(cell) {
                        lit.push(*cell);
                    }
                }
                PresenterEvent::CellLit { cell, lit: false } => lit.retain(|c| c != cell),
                PresenterEvent::GridRendered(_) => lit.clear(),
                _ => {}
            }
        }
        lit
    }

    #[must_use]
    pub fn grids_rendered(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::GridRendered(grid) => Some(grid.size()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_overlay(&self) -> Option<&Overlay> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::OverlayShown(overlay) => Some(overlay),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_leaderboard(&self) -> Option<&[RankedEntry]> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::LeaderboardShown(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_timer(&self) -> Option<TimerIndicator> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Timer(indicator) => Some(*indicator),
            _ => None,
        })
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&PresenterEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn render_grid(&mut self, grid: &GridLayout) {
        self.events.push(PresenterEvent::GridRendered(grid.clone()));
    }

    fn set_cell_lit(&mut self, cell: CellId, lit: bool) {
        self.events.push(PresenterEvent::CellLit { cell, lit });
    }

    fn update_stats(&mut self, level: u32, score: u64) {
        self.events.push(PresenterEvent::Stats { level, score });
    }

    fn update_timer(&mut self, indicator: TimerIndicator) {
        self.events.push(PresenterEvent::Timer(indicator));
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        self.events.push(PresenterEvent::OverlayShown(overlay.clone()));
    }

    fn hide_overlay(&mut self) {
        self.events.push(PresenterEvent::OverlayHidden);
    }

    fn prompt_player_name(&mut self) {
        self.events.push(PresenterEvent::NamePrompted);
    }

    fn show_leaderboard(&mut self, entries: &[RankedEntry]) {
        self.events
            .push(PresenterEvent::LeaderboardShown(entries.to_vec()));
    }

    fn shake_grid(&mut self) {
        self.events.push(PresenterEvent::GridShaken);
    }

    fn set_restart_enabled(&mut self, enabled: bool) {
        self.events.push(PresenterEvent::RestartEnabled(enabled));
    }

    fn set_paused(&mut self, paused: bool) {
        self.events.push(PresenterEvent::Paused(paused));
    }

    fn set_sound_on(&mut self, on: bool) {
        self.events.push(PresenterEvent::SoundOn(on));
    }
}

/// Tone player that records tones and can simulate a blocked audio device.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    tones: Vec<Tone>,
    music_on: bool,
    init_calls: usize,
    fail_init: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A player whose `init` always fails.
    #[must_use]
    pub fn blocked() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    #[must_use]
    pub fn music_on(&self) -> bool {
        self.music_on
    }

    #[must_use]
    pub fn init_calls(&self) -> usize {
        self.init_calls
    }
}

impl TonePlayer for RecordingAudio {
    fn init(&mut self) -> Result<(), AudioError> {
        self.init_calls += 1;
        if self.fail_init {
            return Err(AudioError::Blocked("autoplay disallowed".to_string()));
        }
        Ok(())
    }

    fn play(&mut self, tone: Tone) {
        self.tones.push(tone);
    }

    fn set_music(&mut self, on: bool) {
        self.music_on = on;
    }
}
