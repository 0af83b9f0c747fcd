//! Tone player trait and the game's tone table.

use crate::core::CellId;
use crate::error::AudioError;

/// Oscillator shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single synthesized tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub duration_secs: f32,
}

impl Tone {
    #[must_use]
    pub const fn new(frequency_hz: f32, waveform: Waveform, duration_secs: f32) -> Self {
        Self {
            frequency_hz,
            waveform,
            duration_secs,
        }
    }

    /// Played while a sequence cell is lit; lasts as long as the highlight.
    #[must_use]
    pub fn sequence_cell(cell: CellId, lit_ms: u64) -> Self {
        Self::new(
            300.0 + cell.0 as f32 * 30.0,
            Waveform::Triangle,
            lit_ms as f32 / 1000.0,
        )
    }

    /// Played on a correct selection.
    #[must_use]
    pub fn correct_input(cell: CellId) -> Self {
        Self::new(400.0 + cell.0 as f32 * 20.0, Waveform::Sine, 0.1)
    }

    #[must_use]
    pub const fn round_won() -> Self {
        Self::new(800.0, Waveform::Square, 0.1)
    }

    #[must_use]
    pub const fn wrong_cell() -> Self {
        Self::new(150.0, Waveform::Sawtooth, 0.3)
    }

    #[must_use]
    pub const fn time_out() -> Self {
        Self::new(100.0, Waveform::Sawtooth, 0.5)
    }
}

/// Audio collaborator of the round engine.
pub trait TonePlayer {
    /// Prepare playback (and start background music if enabled).
    ///
    /// Called at the start of every game. Failures are not fatal: the engine
    /// logs them and continues without sound.
    fn init(&mut self) -> Result<(), AudioError>;

    fn play(&mut self, tone: Tone);

    /// Start or stop background music.
    fn set_music(&mut self, on: bool);
}
