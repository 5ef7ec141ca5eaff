//! Events emitted for the presentation layer.
//!
//! Each event follows the mutation it describes. A renderer drains them in
//! order, plays the matching cue, and redraws from `Game::snapshot`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Symbol};
use crate::core::{GameMode, GridSize, PlayerId};
use crate::persistence::GameId;
use crate::session::GameOutcome;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh board was dealt.
    GameStarted { grid_size: GridSize, mode: GameMode },

    /// A card turned face up.
    CardRevealed {
        card: CardId,
        symbol: Symbol,
        /// Seat that revealed it, `None` in solo games.
        by: Option<PlayerId>,
    },

    /// The revealed pair matched.
    PairMatched {
        first: CardId,
        second: CardId,
        scorer: Option<PlayerId>,
    },

    /// The revealed pair differs; the cards turn down after the settle delay.
    PairMismatched { first: CardId, second: CardId },

    /// A mismatched pair turned back down.
    CardsHidden { first: CardId, second: CardId },

    /// The other seat is now to move.
    TurnChanged { to: PlayerId },

    /// The solo clock started on the first reveal.
    ClockStarted,

    /// Whole seconds since the solo clock started.
    ClockTick { elapsed_seconds: u64 },

    /// Every pair matched.
    GameWon { outcome: GameOutcome },

    /// The finished-game record was stored.
    RecordSaved { game_id: GameId },

    /// Storing the finished-game record failed. The win stands.
    PersistenceFailed { message: String },
}

impl GameEvent {
    /// Whether this event should play a sound cue.
    #[must_use]
    pub fn is_cue(&self) -> bool {
        matches!(
            self,
            GameEvent::CardRevealed { .. }
                | GameEvent::PairMatched { .. }
                | GameEvent::PairMismatched { .. }
                | GameEvent::GameWon { .. }
        )
    }
}
