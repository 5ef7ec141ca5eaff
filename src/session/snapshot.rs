//! Read-only views for the presentation layer.
//!
//! Symbols of face-down cards are withheld so a renderer cannot leak them.

use serde::{Deserialize, Serialize};

use super::state::{Session, SessionStatus};
use crate::cards::{CardId, Symbol};
use crate::core::{GameMode, GridSize, PlayerId, Scoreboard};

/// What a renderer may know about one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    /// `Some` only while the card is face up.
    pub symbol: Option<Symbol>,
    pub face_up: bool,
    pub matched: bool,
}

/// Everything needed to redraw the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cards: Vec<CardView>,
    pub grid_size: GridSize,
    pub mode: GameMode,
    pub status: SessionStatus,
    /// `None` in solo games.
    pub current_turn: Option<PlayerId>,
    pub scores: Scoreboard,
    pub moves_taken: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub elapsed_seconds: u64,
}

impl SessionSnapshot {
    /// Capture a session at clock time `now`.
    #[must_use]
    pub fn capture(session: &Session, now: std::time::Duration) -> Self {
        let cards = session
            .cards()
            .iter()
            .map(|card| CardView {
                id: card.id,
                symbol: card.face_up.then_some(card.symbol),
                face_up: card.face_up,
                matched: card.matched,
            })
            .collect();

        Self {
            cards,
            grid_size: session.grid_size(),
            mode: session.mode(),
            status: session.status(),
            current_turn: session.mode().is_versus().then(|| session.current_turn()),
            scores: *session.scores(),
            moves_taken: session.moves_taken(),
            matched_pairs: session.matched_count() / 2,
            total_pairs: session.total_pairs(),
            elapsed_seconds: session.elapsed_seconds(now),
        }
    }
}
