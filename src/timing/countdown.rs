//! Round countdown driven by fixed ticks.
//!
//! The countdown does not schedule anything itself. The owner arms a tick
//! tagged with [`Countdown::generation`] and feeds it back through
//! [`Countdown::tick`]; any start/stop/resume bumps the generation, so ticks
//! armed before it are rejected as stale. Expiry is reported exactly once.

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountdownTick {
    /// Tick from an old arm, or the countdown is stopped.
    Stale,
    /// Time was deducted; more remains.
    Running(TimerReading),
    /// Time ran out on this tick.
    Expired,
}

/// Visual severity of the timer indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Critical,
}

/// Remaining time as a proportion of the round's budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerReading {
    pub remaining_ms: u64,
    pub total_ms: u64,
}

impl TimerReading {
    /// Remaining fraction in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms as f64 / self.total_ms as f64) as f32
    }

    /// `Critical` below `critical_fraction`.
    #[must_use]
    pub fn severity(&self, critical_fraction: f32) -> Severity {
        if self.fraction() < critical_fraction {
            Severity::Critical
        } else {
            Severity::Normal
        }
    }
}

/// Stoppable, resumable countdown.
#[derive(Clone, Debug)]
pub struct Countdown {
    tick_ms: u64,
    total_ms: u64,
    remaining_ms: u64,
    running: bool,
    generation: u64,
}

impl Countdown {
    #[must_use]
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            total_ms: 0,
            remaining_ms: 0,
            running: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    #[must_use]
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tag for the next tick to arm.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn reading(&self) -> TimerReading {
        TimerReading {
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms,
        }
    }

    /// Start a fresh budget, discarding any previous one.
    pub fn start(&mut self, total_ms: u64) {
        self.generation += 1;
        self.total_ms = total_ms;
        self.remaining_ms = total_ms;
        self.running = true;
    }

    /// Stop ticking, keeping the remaining time. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        if was_running {
            self.generation += 1;
            self.running = false;
        }
        was_running
    }

    /// Continue from the remaining time. No-op if running or already expired.
    pub fn resume(&mut self) -> bool {
        if self.running || self.remaining_ms == 0 {
            return false;
        }
        self.generation += 1;
        self.running = true;
        true
    }

    /// Apply one tick armed under `generation`.
    pub fn tick(&mut self, generation: u64) -> CountdownTick {
        if !self.running || generation != self.generation {
            return CountdownTick::Stale;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(self.tick_ms);
        if self.remaining_ms == 0 {
            self.stop();
            return CountdownTick::Expired;
        }
        CountdownTick::Running(self.reading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_down_and_expires_once() {
        let mut countdown = Countdown::new(50);
        countdown.start(150);
        let gen = countdown.generation();

        assert!(matches!(countdown.tick(gen), CountdownTick::Running(r) if r.remaining_ms == 100));
        assert!(matches!(countdown.tick(gen), CountdownTick::Running(r) if r.remaining_ms == 50));
        assert_eq!(countdown.tick(gen), CountdownTick::Expired);
        assert_eq!(countdown.tick(gen), CountdownTick::Stale);
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_uneven_budget_expires_on_last_partial_tick() {
        let mut countdown = Countdown::new(50);
        countdown.start(70);
        let gen = countdown.generation();
        assert!(matches!(countdown.tick(gen), CountdownTick::Running(_)));
        assert_eq!(countdown.tick(gen), CountdownTick::Expired);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut countdown = Countdown::new(50);
        countdown.start(1_000);
        assert!(countdown.stop());
        assert!(!countdown.stop());
        assert_eq!(countdown.remaining_ms(), 1_000);
    }

    #[test]
    fn test_stale_tick_after_stop_and_resume() {
        let mut countdown = Countdown::new(50);
        countdown.start(1_000);
        let old = countdown.generation();

        countdown.stop();
        assert!(countdown.resume());
        assert_eq!(countdown.tick(old), CountdownTick::Stale);
        assert_eq!(countdown.remaining_ms(), 1_000);

        let current = countdown.generation();
        assert!(matches!(countdown.tick(current), CountdownTick::Running(r) if r.remaining_ms == 950));
    }

    #[test]
    fn test_restart_invalidates_previous_arm() {
        let mut countdown = Countdown::new(50);
        countdown.start(500);
        let first = countdown.generation();
        countdown.start(800);
        assert_eq!(countdown.tick(first), CountdownTick::Stale);
        assert_eq!(countdown.remaining_ms(), 800);
    }

    #[test]
    fn test_resume_after_expiry_is_noop() {
        let mut countdown = Countdown::new(50);
        countdown.start(50);
        let gen = countdown.generation();
        assert_eq!(countdown.tick(gen), CountdownTick::Expired);
        assert!(!countdown.resume());
    }

    #[test]
    fn test_reading_severity() {
        let reading = TimerReading { remaining_ms: 290, total_ms: 1_000 };
        assert_eq!(reading.severity(0.3), Severity::Critical);
        let reading = TimerReading { remaining_ms: 300, total_ms: 1_000 };
        assert_eq!(reading.severity(0.3), Severity::Normal);
        assert!((reading.fraction() - 0.3).abs() < 1e-6);
    }
}
