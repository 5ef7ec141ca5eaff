//! Turn ownership.
//!
//! Evaluated once per resolved pair: a match keeps the turn, a mismatch
//! passes it. Solo games never change turn.

use super::state::{Session, SessionStatus};
use crate::core::PlayerId;

pub struct TurnController;

impl TurnController {
    /// Apply the turn rule for a resolved pair. Returns the new seat if the
    /// turn changed.
    pub fn after_pair(session: &mut Session, matched: bool) -> Option<PlayerId> {
        if matched || !session.mode().is_versus() {
            return None;
        }

        let next = session.current_turn().other();
        session.set_turn(next);
        Some(next)
    }

    /// Whether the driver should schedule a CPU move now.
    #[must_use]
    pub fn cpu_should_move(session: &Session) -> bool {
        session.is_cpu_turn() && session.status() == SessionStatus::InProgress
    }
}
