//! Win detection and final scoring.
//!
//! Solo games are scored once, at the win:
//!
//! ```text
//! score = max(0, 1000 - moves * 5 - floor(elapsed_seconds / 10))
//! ```
//!
//! Versus games report pair counts instead.

use serde::{Deserialize, Serialize};

use super::state::{Session, SessionStatus};
use crate::core::{PlayerId, Scoreboard};
use crate::persistence::FinishedGameRecord;

/// Score before any deductions.
pub const BASE_SCORE: i64 = 1000;
/// Deduction per move.
pub const MOVE_PENALTY: i64 = 5;
/// Seconds per one-point time deduction.
pub const SECONDS_PER_POINT: u64 = 10;

pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Solo score for the final move count and elapsed time. Never negative.
    ///
    /// ```
    /// use memory_engine::session::ScoreCalculator;
    ///
    /// assert_eq!(ScoreCalculator::score(10, 50), 945);
    /// assert_eq!(ScoreCalculator::score(250, 0), 0);
    /// ```
    #[must_use]
    pub fn score(moves_taken: u32, elapsed_seconds: u64) -> u32 {
        let time_penalty = i64::try_from(elapsed_seconds / SECONDS_PER_POINT).unwrap_or(i64::MAX);
        let raw = BASE_SCORE
            .saturating_sub(i64::from(moves_taken) * MOVE_PENALTY)
            .saturating_sub(time_penalty);
        raw.max(0) as u32
    }
}

/// Final result of a won session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Solo game: the record handed to the persistence collaborator.
    Solo(FinishedGameRecord),
    /// Versus game: pair counts and the winner, `None` on a draw.
    Versus {
        scores: Scoreboard,
        winner: Option<PlayerId>,
    },
}

impl GameOutcome {
    /// The solo record, if this was a solo game.
    #[must_use]
    pub fn record(&self) -> Option<&FinishedGameRecord> {
        match self {
            GameOutcome::Solo(record) => Some(record),
            GameOutcome::Versus { .. } => None,
        }
    }
}

pub struct WinDetector;

impl WinDetector {
    /// Every card matched.
    #[must_use]
    pub fn is_won(session: &Session) -> bool {
        session.matched_count() / 2 == session.total_pairs()
    }

    /// Mark the session `Won` if every pair is matched. Returns whether it
    /// is won. Only meaningful right after a pair resolves.
    pub fn check(session: &mut Session) -> bool {
        if session.status() == SessionStatus::Won {
            return true;
        }
        if session.status() != SessionStatus::InProgress || !Self::is_won(session) {
            return false;
        }
        session.set_status(SessionStatus::Won);
        true
    }

    /// Build the outcome of a won session at clock time `now`.
    #[must_use]
    pub fn outcome(session: &Session, now: std::time::Duration) -> GameOutcome {
        if session.mode().is_versus() {
            let scores = *session.scores();
            return GameOutcome::Versus {
                scores,
                winner: scores.leader(),
            };
        }

        let moves_taken = session.moves_taken();
        let elapsed_seconds = session.elapsed_seconds(now);
        GameOutcome::Solo(FinishedGameRecord {
            moves_taken,
            elapsed_seconds,
            completed: true,
            score: ScoreCalculator::score(moves_taken, elapsed_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, GridGenerator};
    use crate::core::{GameMode, GridSize, SequenceRng};
    use crate::session::evaluator::MatchEvaluator;
    use crate::session::state::Actor;
    use std::time::Duration;

    fn session(mode: GameMode) -> Session {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, mode);
        session.start();
        session
    }

    fn match_pair(session: &mut Session, i: u32) {
        session.reveal(CardId::new(i), Actor::Human).unwrap();
        session.reveal(CardId::new(i + 8), Actor::Human).unwrap();
        MatchEvaluator::resolve(session).unwrap();
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(ScoreCalculator::score(10, 50), 945);
        assert_eq!(ScoreCalculator::score(250, 0), 0);
        assert_eq!(ScoreCalculator::score(0, 0), 1000);
        // floor(59 / 10) = 5
        assert_eq!(ScoreCalculator::score(8, 59), 955);
        assert_eq!(ScoreCalculator::score(u32::MAX, u64::MAX), 0);
    }

    #[test]
    fn test_win_after_exactly_eight_matches() {
        let mut session = session(GameMode::Solo);

        for i in 0..8 {
            assert!(!WinDetector::check(&mut session), "won after {} matches", i);
            match_pair(&mut session, i);
        }

        assert!(WinDetector::check(&mut session));
        assert_eq!(session.status(), SessionStatus::Won);
        assert_eq!(session.matched_count(), 16);
    }

    #[test]
    fn test_solo_outcome() {
        let mut session = session(GameMode::Solo);
        session.start_clock(Duration::from_secs(2));
        for i in 0..8 {
            match_pair(&mut session, i);
        }
        assert!(WinDetector::check(&mut session));

        let outcome = WinDetector::outcome(&session, Duration::from_millis(52_900));
        assert_eq!(
            outcome,
            GameOutcome::Solo(FinishedGameRecord {
                moves_taken: 8,
                elapsed_seconds: 50,
                completed: true,
                score: 1000 - 40 - 5,
            })
        );
        assert!(outcome.record().is_some());
    }

    #[test]
    fn test_versus_outcome() {
        let mut session = session(GameMode::LocalTwoPlayer);
        for i in 0..8 {
            match_pair(&mut session, i);
        }
        assert!(WinDetector::check(&mut session));

        let outcome = WinDetector::outcome(&session, Duration::ZERO);
        match outcome {
            GameOutcome::Versus { scores, winner } => {
                assert_eq!(scores[PlayerId::ONE], 8);
                assert_eq!(winner, Some(PlayerId::ONE));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
