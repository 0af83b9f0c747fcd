//! Presentation and audio collaborators.
//!
//! The engine talks to the outside world only through [`Presenter`] and
//! [`TonePlayer`]. Platform shells implement them; this module also ships
//! recording implementations (tests, replays) and headless ones (simulation).

mod audio;
mod headless;
mod presenter;
mod recording;

pub use audio::{Tone, TonePlayer, Waveform};
pub use headless::{SilentAudio, TracingPresenter};
pub use presenter::{Overlay, Presenter, TimerIndicator};
pub use recording::{PresenterEvent, RecordingAudio, RecordingPresenter};
