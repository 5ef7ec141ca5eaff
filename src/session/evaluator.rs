//! Match evaluation.
//!
//! `resolve` compares the two revealed cards. A match is applied at once;
//! a mismatch leaves both cards up and the session `Resolving` until the
//! driver calls `settle` after the settle delay.

use serde::{Deserialize, Serialize};

use super::state::{Session, SessionStatus};
use super::turn::TurnController;
use crate::cards::CardId;
use crate::core::PlayerId;

/// Outcome of comparing the revealed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairResult {
    /// Symbols equal. Both cards are now matched.
    Match {
        first: CardId,
        second: CardId,
        /// Seat credited with the pair, `None` in solo games.
        scorer: Option<PlayerId>,
    },
    /// Symbols differ. Both cards stay up until settled.
    Mismatch { first: CardId, second: CardId },
}

/// Compares and applies revealed pairs.
pub struct MatchEvaluator;

impl MatchEvaluator {
    /// Resolve the revealed pair. Returns `None` unless the session is
    /// `Resolving` with exactly two cards up.
    pub fn resolve(session: &mut Session) -> Option<PairResult> {
        if session.status() != SessionStatus::Resolving {
            return None;
        }
        let (first, second) = match *session.revealed() {
            [first, second] => (first, second),
            _ => return None,
        };

        let a = session.card(first)?.symbol;
        let b = session.card(second)?.symbol;

        if a != b {
            return Some(PairResult::Mismatch { first, second });
        }

        for id in [first, second] {
            session.update_card(id, |card| {
                card.face_up = true;
                card.matched = true;
            });
        }

        let scorer = if session.mode().is_versus() {
            let player = session.current_turn();
            session.scores_mut().award_pair(player);
            Some(player)
        } else {
            None
        };

        session.clear_revealed();
        session.set_status(SessionStatus::InProgress);
        TurnController::after_pair(session, true);

        Some(PairResult::Match {
            first,
            second,
            scorer,
        })
    }

    /// Turn a mismatched pair back down and pass the turn.
    ///
    /// Returns the new seat when the turn changed. No effect unless the
    /// session is still `Resolving` on exactly this pair, so a stale settle
    /// cannot touch a different board state.
    pub fn settle(session: &mut Session, first: CardId, second: CardId) -> Option<PlayerId> {
        if session.status() != SessionStatus::Resolving || session.revealed() != [first, second] {
            return None;
        }

        for id in [first, second] {
            session.update_card(id, |card| card.face_up = false);
        }

        session.clear_revealed();
        session.set_status(SessionStatus::InProgress);
        TurnController::after_pair(session, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::GridGenerator;
    use crate::core::{GameMode, GridSize, SequenceRng};
    use crate::session::state::Actor;

    fn session(mode: GameMode) -> Session {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, mode);
        session.start();
        session
    }

    fn flip(session: &mut Session, a: u32, b: u32) {
        session.reveal(CardId::new(a), Actor::Human).unwrap();
        session.reveal(CardId::new(b), Actor::Human).unwrap();
    }

    #[test]
    fn test_resolve_requires_pair() {
        let mut session = session(GameMode::Solo);
        assert_eq!(MatchEvaluator::resolve(&mut session), None);

        session.reveal(CardId::new(0), Actor::Human).unwrap();
        assert_eq!(MatchEvaluator::resolve(&mut session), None);
    }

    #[test]
    fn test_match_in_solo() {
        let mut session = session(GameMode::Solo);
        flip(&mut session, 0, 8);

        let result = MatchEvaluator::resolve(&mut session);
        assert_eq!(
            result,
            Some(PairResult::Match {
                first: CardId::new(0),
                second: CardId::new(8),
                scorer: None,
            })
        );

        for id in [0, 8] {
            let card = session.card(CardId::new(id)).unwrap();
            assert!(card.matched && card.face_up);
        }
        assert!(session.revealed().is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.scores().total(), 0);
    }

    #[test]
    fn test_match_scores_current_player() {
        let mut session = session(GameMode::LocalTwoPlayer);
        session.set_turn(PlayerId::TWO);
        flip(&mut session, 3, 11);

        let result = MatchEvaluator::resolve(&mut session);
        assert!(matches!(result, Some(PairResult::Match { scorer: Some(p), .. }) if p == PlayerId::TWO));
        assert_eq!(session.scores()[PlayerId::TWO], 1);
        assert_eq!(session.current_turn(), PlayerId::TWO);
    }

    #[test]
    fn test_mismatch_waits_for_settle() {
        let mut session = session(GameMode::LocalTwoPlayer);
        flip(&mut session, 0, 1);

        let result = MatchEvaluator::resolve(&mut session);
        assert_eq!(
            result,
            Some(PairResult::Mismatch {
                first: CardId::new(0),
                second: CardId::new(1),
            })
        );
        assert_eq!(session.status(), SessionStatus::Resolving);
        assert!(session.card(CardId::new(0)).unwrap().face_up);

        let turn = MatchEvaluator::settle(&mut session, CardId::new(0), CardId::new(1));
        assert_eq!(turn, Some(PlayerId::TWO));
        assert!(!session.card(CardId::new(0)).unwrap().face_up);
        assert!(!session.card(CardId::new(1)).unwrap().face_up);
        assert!(session.revealed().is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_settle_ignores_other_pair() {
        let mut session = session(GameMode::Solo);
        flip(&mut session, 0, 1);
        MatchEvaluator::resolve(&mut session);

        assert_eq!(MatchEvaluator::settle(&mut session, CardId::new(2), CardId::new(3)), None);
        assert_eq!(session.status(), SessionStatus::Resolving);
        assert_eq!(session.revealed().len(), 2);
    }

    #[test]
    fn test_solo_settle_keeps_turn() {
        let mut session = session(GameMode::Solo);
        flip(&mut session, 0, 1);
        MatchEvaluator::resolve(&mut session);

        assert_eq!(MatchEvaluator::settle(&mut session, CardId::new(0), CardId::new(1)), None);
        assert_eq!(session.current_turn(), PlayerId::ONE);
        assert_eq!(session.moves_taken(), 1);
    }
}
