//! Game configuration: timing constants, palette and leaderboard settings.
//!
//! Every field has a default matching the shipped game, so configs loaded
//! from JSON only need to name what they override.

use serde::{Deserialize, Serialize};

use super::grid::{Color, DEFAULT_PALETTE};
use crate::error::ConfigError;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed part of the input time budget.
    pub base_time_limit_ms: u64,

    /// Extra input time granted per sequence element.
    pub time_per_step_ms: u64,

    /// Countdown tick interval.
    pub tick_ms: u64,

    /// How long a cell stays lit during playback at speed factor 1.0.
    pub highlight_ms: u64,

    /// Gap between lit cells during playback at speed factor 1.0.
    pub highlight_gap_ms: u64,

    /// Speed factor lost per level (factor = 1 - level * decay).
    pub speed_decay_per_level: f64,

    /// Floor for the playback speed factor.
    pub min_speed_factor: f64,

    /// Pause between appending a step and starting playback.
    pub playback_lead_in_ms: u64,

    /// Pause after a board rebuild before the new step is appended.
    pub grid_settle_ms: u64,

    /// Pause between a won round and the next round.
    pub next_round_delay_ms: u64,

    /// How long a selected cell flashes.
    pub input_flash_ms: u64,

    /// Remaining-time fraction under which the timer turns critical.
    pub critical_fraction: f32,

    /// Cyclic cell palette.
    pub palette: Vec<Color>,

    /// Leaderboard size.
    pub leaderboard_capacity: usize,

    /// Storage key holding the serialized leaderboard.
    pub leaderboard_key: String,

    /// Name recorded when the player leaves the name blank.
    pub default_player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_time_limit_ms: 4_000,
            time_per_step_ms: 1_200,
            tick_ms: 50,
            highlight_ms: 500,
            highlight_gap_ms: 150,
            speed_decay_per_level: 0.03,
            min_speed_factor: 0.4,
            playback_lead_in_ms: 800,
            grid_settle_ms: 500,
            next_round_delay_ms: 800,
            input_flash_ms: 150,
            critical_fraction: 0.3,
            palette: DEFAULT_PALETTE.to_vec(),
            leaderboard_capacity: 3,
            leaderboard_key: "memoryGameScores".to_string(),
            default_player_name: "JUGADOR".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::invalid("tick_ms", "must be greater than zero"));
        }
        if self.base_time_limit_ms == 0 && self.time_per_step_ms == 0 {
            return Err(ConfigError::invalid(
                "base_time_limit_ms",
                "time budget is zero for every round",
            ));
        }
        if !(self.min_speed_factor > 0.0 && self.min_speed_factor <= 1.0) {
            return Err(ConfigError::invalid(
                "min_speed_factor",
                format!("must be in (0, 1], got {}", self.min_speed_factor),
            ));
        }
        if !(self.speed_decay_per_level >= 0.0) {
            return Err(ConfigError::invalid(
                "speed_decay_per_level",
                "must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.critical_fraction) {
            return Err(ConfigError::invalid(
                "critical_fraction",
                "must be within 0.0..=1.0",
            ));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("palette", "needs at least one colour"));
        }
        if self.leaderboard_capacity == 0 {
            return Err(ConfigError::invalid(
                "leaderboard_capacity",
                "must keep at least one entry",
            ));
        }
        if self.leaderboard_key.is_empty() {
            return Err(ConfigError::invalid("leaderboard_key", "must not be empty"));
        }
        Ok(())
    }

    /// Input time budget for a sequence of `len` elements, saturating at `u64::MAX`.
    #[must_use]
    pub fn time_budget_ms(&self, len: usize) -> u64 {
        self.time_per_step_ms
            .saturating_mul(len as u64)
            .saturating_add(self.base_time_limit_ms)
    }

    /// Playback speed factor for a level: `max(min, 1 - level * decay)`.
    #[must_use]
    pub fn speed_factor(&self, level: u32) -> f64 {
        (1.0 - f64::from(level) * self.speed_decay_per_level).max(self.min_speed_factor)
    }

    /// Lit and gap durations for a level, truncated to whole milliseconds.
    #[must_use]
    pub fn playback_pace(&self, level: u32) -> Pace {
        let factor = self.speed_factor(level);
        Pace {
            on_ms: (self.highlight_ms as f64 * factor) as u64,
            off_ms: (self.highlight_gap_ms as f64 * factor) as u64,
        }
    }

    #[must_use]
    pub fn with_time_budget(mut self, base_ms: u64, per_step_ms: u64) -> Self {
        self.base_time_limit_ms = base_ms;
        self.time_per_step_ms = per_step_ms;
        self
    }

    #[must_use]
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_leaderboard_key(mut self, key: impl Into<String>) -> Self {
        self.leaderboard_key = key.into();
        self
    }

    #[must_use]
    pub fn with_default_player_name(mut self, name: impl Into<String>) -> Self {
        self.default_player_name = name.into();
        self
    }
}

/// Playback timing for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    pub on_ms: u64,
    pub off_ms: u64,
}
