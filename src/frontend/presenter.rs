//! Presenter trait: everything the engine shows to the player.
//!
//! Implementations map these calls onto a concrete UI (DOM, immediate-mode
//! GUI, terminal). The engine owns all timing: a cell stays lit until the
//! engine switches it off again.

use crate::core::{CellId, GridLayout};
use crate::scores::RankedEntry;
use crate::timing::{Severity, TimerReading};

/// Proportional timer bar state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerIndicator {
    /// Remaining fraction in `0.0..=1.0`.
    pub fraction: f32,
    pub severity: Severity,
}

impl TimerIndicator {
    /// Full bar, shown while the sequence plays.
    #[must_use]
    pub fn full() -> Self {
        Self {
            fraction: 1.0,
            severity: Severity::Normal,
        }
    }

    #[must_use]
    pub fn from_reading(reading: TimerReading, critical_fraction: f32) -> Self {
        Self {
            fraction: reading.fraction(),
            severity: reading.severity(critical_fraction),
        }
    }
}

/// Modal overlay content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    /// Body text; `None` hides the message area.
    pub message: Option<String>,
    /// Label of the primary button; `None` hides it.
    pub action: Option<String>,
}

impl Overlay {
    /// Overlay shown while paused.
    #[must_use]
    pub fn paused() -> Self {
        Self {
            title: "PAUSA".to_string(),
            message: Some("Juego detenido".to_string()),
            action: Some("CONTINUAR".to_string()),
        }
    }

    /// Overlay shown when a game ends.
    #[must_use]
    pub fn game_over(reason: &str, score: u64) -> Self {
        Self {
            title: "¡FIN DEL JUEGO!".to_string(),
            message: Some(format!("{}\nPuntos: {}", reason, score)),
            action: None,
        }
    }
}

/// Rendering collaborator of the round engine.
pub trait Presenter {
    /// Replace the whole board. Previously rendered cells no longer exist.
    fn render_grid(&mut self, grid: &GridLayout);

    /// Light or unlight one cell.
    fn set_cell_lit(&mut self, cell: CellId, lit: bool);

    fn update_stats(&mut self, level: u32, score: u64);

    fn update_timer(&mut self, indicator: TimerIndicator);

    fn show_overlay(&mut self, overlay: &Overlay);

    fn hide_overlay(&mut self);

    /// Ask for the name to record a qualifying score under.
    fn prompt_player_name(&mut self);

    /// Replace the overlay body with the ranked leaderboard (may be empty).
    fn show_leaderboard(&mut self, entries: &[RankedEntry]);

    // === Cosmetic hooks ===

    fn shake_grid(&mut self) {}

    fn set_restart_enabled(&mut self, _enabled: bool) {}

    fn set_paused(&mut self, _paused: bool) {}

    fn set_sound_on(&mut self, _on: bool) {}
}
