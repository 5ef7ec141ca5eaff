//! Records exchanged with the persistence collaborator.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::core::GridSize;

/// Identifier issued by the persistence collaborator when a game is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Result of a won solo game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FinishedGameRecord {
    pub moves_taken: u32,
    pub elapsed_seconds: u64,
    pub completed: bool,
    pub score: u32,
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub game_id: GameId,
    pub player: String,
    pub grid_size: GridSize,
    pub score: u32,
    pub elapsed_seconds: u64,
}

/// Failure reported by the persistence collaborator. Never fatal to a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Persistence error: {} at {}:{}", message, file, line)]
pub struct PersistenceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
