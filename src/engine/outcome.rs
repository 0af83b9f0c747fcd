//! Commands accepted by the engine and the results it reports back.

use crate::core::CellId;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The player selected a cell out of order.
    WrongCell,
    /// The countdown reached zero during input.
    TimedOut,
    /// The player pressed restart mid-game.
    Restarted,
}

impl EndReason {
    /// User-facing text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            EndReason::WrongCell => "¡Ups! Ese no era.",
            EndReason::TimedOut => "¡Se acabó el tiempo!",
            EndReason::Restarted => "Reiniciado",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a cell selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not accepting input right now (or the cell is off the board).
    Ignored,
    /// Correct; `remaining` more cells to go this round.
    Correct { step: usize, remaining: usize },
    /// Last cell of the round matched.
    RoundWon { gained: u64, next_level: u32 },
    /// Wrong cell; the game is over.
    GameOver(EndReason),
}

/// Summary of the last finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub reason: EndReason,
    pub final_score: u64,
    /// The score qualified and the engine is waiting for a name (or dismissal).
    pub awaiting_name: bool,
}

/// Player and UI commands, for hosts that route events through one entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    /// Ends the running game. The reason is always [`EndReason::Restarted`].
    Restart,
    ToggleSound,
    SaveScore(String),
    DismissLeaderboard,
    Select(CellId),
}
