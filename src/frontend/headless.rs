//! Collaborators for running without a UI: log what would be shown, play nothing.

use tracing::{debug, info};

use super::audio::{Tone, TonePlayer};
use super::presenter::{Overlay, Presenter, TimerIndicator};
use crate::core::{CellId, GridLayout};
use crate::error::AudioError;
use crate::scores::RankedEntry;

/// Presenter that emits `tracing` events instead of drawing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn render_grid(&mut self, grid: &GridLayout) {
        debug!(size = grid.size(), cells = grid.cell_count(), "grid rendered");
    }

    fn set_cell_lit(&mut self, cell: CellId, lit: bool) {
        debug!(cell = cell.0, lit, "cell");
    }

    fn update_stats(&mut self, level: u32, score: u64) {
        debug!(level, score, "stats");
    }

    fn update_timer(&mut self, _indicator: TimerIndicator) {}

    fn show_overlay(&mut self, overlay: &Overlay) {
        info!(
            title = %overlay.title,
            message = overlay.message.as_deref().unwrap_or(""),
            "overlay"
        );
    }

    fn hide_overlay(&mut self) {}

    fn prompt_player_name(&mut self) {
        info!("new high score, waiting for a name");
    }

    fn show_leaderboard(&mut self, entries: &[RankedEntry]) {
        if entries.is_empty() {
            info!("leaderboard is empty");
        }
        for entry in entries {
            info!("{}", entry);
        }
    }
}

/// Tone player with no output device.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl TonePlayer for SilentAudio {
    fn init(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, _tone: Tone) {}

    fn set_music(&mut self, _on: bool) {}
}
