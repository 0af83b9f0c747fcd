//! Error types for the collaborator seams and configuration loading.
//!
//! The round engine itself never returns these: storage and audio failures
//! are logged and the game degrades gracefully (empty leaderboard, no sound).

use thiserror::Error;

/// Invalid or unreadable [`GameConfig`](crate::core::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure reported by a [`KeyValueStore`](crate::scores::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key `{key}`")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by a [`TonePlayer`](crate::frontend::TonePlayer) on init.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The platform refused to start playback (e.g. autoplay policy).
    #[error("audio playback blocked: {0}")]
    Blocked(String),

    #[error("no audio device available")]
    Unavailable,
}
