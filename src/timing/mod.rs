//! Time: a virtual clock for scheduled continuations and the round countdown.
//!
//! The engine never sleeps. Hosts advance the clock (from a real frame loop,
//! a browser interval, or a test) and the engine reacts to whatever fell due.

mod clock;
mod countdown;

pub use clock::VirtualClock;
pub use countdown::{Countdown, CountdownTick, Severity, TimerReading};
