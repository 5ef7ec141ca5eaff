//! Session state and the reveal operation.
//!
//! A `Session` is the authoritative record of one game. It is created for a
//! fresh board, mutated only through `reveal` and the evaluator/turn
//! transitions, and frozen once won. A new game replaces it outright.
//!
//! ## Status
//!
//! ```text
//! Setup --start--> InProgress --2nd reveal--> Resolving --resolve--> InProgress
//!                                                     \--last pair--> Won
//! ```

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, Symbol};
use crate::core::{EngineError, GameMode, GridSize, PlayerId, Scoreboard};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Board dealt, not yet accepting reveals.
    #[default]
    Setup,
    /// Waiting for a reveal.
    InProgress,
    /// Two cards are up and have not been resolved yet.
    Resolving,
    /// Every pair matched. Terminal.
    Won,
}

/// Who is asking to reveal a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// Input from a person at the board.
    Human,
    /// The CPU agent in vs-cpu games.
    Cpu,
}

/// Why a reveal was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Session is in setup, resolving, or won.
    NotInProgress,
    /// Two cards are already up and unresolved.
    PairPending,
    /// It is the other side's turn.
    OutOfTurn,
    /// The card is already face up.
    AlreadyFaceUp,
    /// The card is already matched.
    AlreadyMatched,
}

/// Result of an accepted or ignored reveal at the session level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair is up.
    First { card: CardId, symbol: Symbol },
    /// Second card is up; the session is now resolving.
    Second { card: CardId, symbol: Symbol },
}

/// One game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    cards: Vector<Card>,
    grid_size: GridSize,
    mode: GameMode,
    current_turn: PlayerId,
    scores: Scoreboard,
    moves_taken: u32,
    revealed: SmallVec<[CardId; 2]>,
    status: SessionStatus,
    started_at: Option<Duration>,
    stopped_at: Option<Duration>,
}

impl Session {
    /// Create a session in `Setup` for a dealt board.
    ///
    /// Panics if the card count does not match the grid size.
    #[must_use]
    pub fn new(cards: Vector<Card>, grid_size: GridSize, mode: GameMode) -> Self {
        assert_eq!(cards.len(), grid_size.cards(), "Board does not match grid size");

        Self {
            cards,
            grid_size,
            mode,
            current_turn: PlayerId::ONE,
            scores: Scoreboard::new(),
            moves_taken: 0,
            revealed: SmallVec::new(),
            status: SessionStatus::Setup,
            started_at: None,
            stopped_at: None,
        }
    }

    /// Open the session for reveals. No effect outside `Setup`.
    pub fn start(&mut self) {
        if self.status == SessionStatus::Setup {
            self.status = SessionStatus::InProgress;
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Seat to move. Always `PlayerId::ONE` in solo games.
    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    #[must_use]
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Completed pairs of flips (solo games only).
    #[must_use]
    pub fn moves_taken(&self) -> u32 {
        self.moves_taken
    }

    /// Cards currently up and awaiting resolution, in reveal order.
    #[must_use]
    pub fn revealed(&self) -> &[CardId] {
        &self.revealed
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Clock time of the first reveal in a solo game.
    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Whole seconds the clock has run, 0 if it never started. Frozen once
    /// the clock is stopped.
    #[must_use]
    pub fn elapsed_seconds(&self, now: Duration) -> u64 {
        let end = self.stopped_at.unwrap_or(now);
        self.started_at
            .map(|start| end.saturating_sub(start).as_secs())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.grid_size.pairs()
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    /// Ids of face-down, unmatched cards in board order.
    #[must_use]
    pub fn revealable_ids(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.is_revealable())
            .map(|c| c.id)
            .collect()
    }

    /// Whether the CPU seat is to move.
    #[must_use]
    pub fn is_cpu_turn(&self) -> bool {
        self.mode.cpu_seat() == Some(self.current_turn)
    }

    /// True until the first reveal of a solo game has started the clock.
    #[must_use]
    pub fn clock_pending(&self) -> bool {
        self.mode == GameMode::Solo && self.started_at.is_none() && self.moves_taken == 0
    }

    // === Reveal ===

    /// Turn a card face up.
    ///
    /// Out-of-range ids are an error and leave the session untouched.
    /// Reveals that are illegal right now are ignored with a reason.
    pub fn reveal(&mut self, id: CardId, actor: Actor) -> Result<Reveal, EngineError> {
        let Some(card) = self.cards.get(id.index()) else {
            return Err(EngineError::CardOutOfRange {
                id,
                len: self.cards.len(),
            });
        };

        if let Some(reason) = self.ignore_reason(card, actor) {
            return Ok(Reveal::Ignored(reason));
        }

        let symbol = card.symbol;
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.face_up = true;
        }
        self.revealed.push(id);

        if self.revealed.len() < 2 {
            return Ok(Reveal::First { card: id, symbol });
        }

        self.status = SessionStatus::Resolving;
        if self.mode == GameMode::Solo {
            self.moves_taken += 1;
        }
        Ok(Reveal::Second { card: id, symbol })
    }

    fn ignore_reason(&self, card: &Card, actor: Actor) -> Option<IgnoreReason> {
        if self.status != SessionStatus::InProgress {
            return Some(IgnoreReason::NotInProgress);
        }
        if self.revealed.len() >= 2 {
            return Some(IgnoreReason::PairPending);
        }
        if self.mode == GameMode::VsCpu && self.is_cpu_turn() != (actor == Actor::Cpu) {
            return Some(IgnoreReason::OutOfTurn);
        }
        if card.matched {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if card.face_up {
            return Some(IgnoreReason::AlreadyFaceUp);
        }
        None
    }

    /// Record the clock start. Only the first call has an effect.
    pub fn start_clock(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Freeze the clock. No effect if it never started or already stopped.
    pub fn stop_clock(&mut self, now: Duration) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(now);
        }
    }

    // === Transitions (evaluator, turn controller, win detector) ===

    pub(crate) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    pub(crate) fn set_turn(&mut self, player: PlayerId) {
        self.current_turn = player;
    }

    pub(crate) fn scores_mut(&mut self) -> &mut Scoreboard {
        &mut self.scores
    }

    pub(crate) fn clear_revealed(&mut self) {
        self.revealed.clear();
    }

    pub(crate) fn update_card(&mut self, id: CardId, f: impl FnOnce(&mut Card)) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            f(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::GridGenerator;
    use crate::core::SequenceRng;

    /// Unshuffled 16-card board: card i pairs with card i + 8.
    fn session(mode: GameMode) -> Session {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, mode);
        session.start();
        session
    }

    #[test]
    fn test_new_session_defaults() {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let session = Session::new(cards, GridSize::Small, GameMode::Solo);

        assert_eq!(session.status(), SessionStatus::Setup);
        assert_eq!(session.current_turn(), PlayerId::ONE);
        assert_eq!(session.scores().total(), 0);
        assert_eq!(session.moves_taken(), 0);
        assert!(session.revealed().is_empty());
        assert_eq!(session.started_at(), None);
        assert_eq!(session.total_pairs(), 8);
    }

    #[test]
    fn test_reveal_ignored_in_setup() {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, GameMode::Solo);

        let result = session.reveal(CardId::new(0), Actor::Human).unwrap();
        assert_eq!(result, Reveal::Ignored(IgnoreReason::NotInProgress));
        assert!(!session.cards()[0].face_up);
    }

    #[test]
    fn test_first_and_second_reveal() {
        let mut session = session(GameMode::Solo);

        let first = session.reveal(CardId::new(0), Actor::Human).unwrap();
        assert!(matches!(first, Reveal::First { card, .. } if card == CardId::new(0)));
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.moves_taken(), 0);

        let second = session.reveal(CardId::new(3), Actor::Human).unwrap();
        assert!(matches!(second, Reveal::Second { card, .. } if card == CardId::new(3)));
        assert_eq!(session.status(), SessionStatus::Resolving);
        assert_eq!(session.moves_taken(), 1);
        assert_eq!(session.revealed(), &[CardId::new(0), CardId::new(3)]);
    }

    #[test]
    fn test_third_reveal_ignored() {
        let mut session = session(GameMode::Solo);
        session.reveal(CardId::new(0), Actor::Human).unwrap();
        session.reveal(CardId::new(1), Actor::Human).unwrap();

        let third = session.reveal(CardId::new(2), Actor::Human).unwrap();
        assert_eq!(third, Reveal::Ignored(IgnoreReason::NotInProgress));
        assert_eq!(session.revealed().len(), 2);
        assert!(!session.cards()[2].face_up);
    }

    #[test]
    fn test_same_card_twice_ignored() {
        let mut session = session(GameMode::Solo);
        session.reveal(CardId::new(4), Actor::Human).unwrap();

        let again = session.reveal(CardId::new(4), Actor::Human).unwrap();
        assert_eq!(again, Reveal::Ignored(IgnoreReason::AlreadyFaceUp));
        assert_eq!(session.revealed(), &[CardId::new(4)]);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut session = session(GameMode::Solo);
        let before = session.clone();

        let result = session.reveal(CardId::new(16), Actor::Human);
        assert_eq!(
            result,
            Err(EngineError::CardOutOfRange { id: CardId::new(16), len: 16 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_versus_modes_do_not_count_moves() {
        for mode in [GameMode::LocalTwoPlayer, GameMode::VsCpu] {
            let mut session = session(mode);
            session.reveal(CardId::new(0), Actor::Human).unwrap();
            session.reveal(CardId::new(1), Actor::Human).unwrap();
            assert_eq!(session.moves_taken(), 0);
        }
    }

    #[test]
    fn test_vs_cpu_turn_guard() {
        let mut session = session(GameMode::VsCpu);

        let cpu_early = session.reveal(CardId::new(0), Actor::Cpu).unwrap();
        assert_eq!(cpu_early, Reveal::Ignored(IgnoreReason::OutOfTurn));

        session.set_turn(PlayerId::TWO);
        let human_late = session.reveal(CardId::new(0), Actor::Human).unwrap();
        assert_eq!(human_late, Reveal::Ignored(IgnoreReason::OutOfTurn));

        let cpu = session.reveal(CardId::new(0), Actor::Cpu).unwrap();
        assert!(matches!(cpu, Reveal::First { .. }));
    }

    #[test]
    fn test_local_two_player_has_no_turn_guard() {
        let mut session = session(GameMode::LocalTwoPlayer);
        session.set_turn(PlayerId::TWO);
        let result = session.reveal(CardId::new(0), Actor::Human).unwrap();
        assert!(matches!(result, Reveal::First { .. }));
    }

    #[test]
    fn test_clock() {
        let mut session = session(GameMode::Solo);
        assert!(session.clock_pending());
        assert_eq!(session.elapsed_seconds(Duration::from_secs(30)), 0);

        session.start_clock(Duration::from_millis(1500));
        session.start_clock(Duration::from_secs(9));
        assert!(!session.clock_pending());
        assert_eq!(session.started_at(), Some(Duration::from_millis(1500)));
        assert_eq!(session.elapsed_seconds(Duration::from_millis(12_400)), 10);

        session.stop_clock(Duration::from_secs(20));
        session.stop_clock(Duration::from_secs(40));
        assert_eq!(session.elapsed_seconds(Duration::from_secs(90)), 18);
    }

    #[test]
    fn test_clock_never_pending_in_versus() {
        assert!(!session(GameMode::VsCpu).clock_pending());
        assert!(!session(GameMode::LocalTwoPlayer).clock_pending());
    }

    #[test]
    fn test_revealable_ids() {
        let mut session = session(GameMode::Solo);
        session.reveal(CardId::new(2), Actor::Human).unwrap();
        session.update_card(CardId::new(5), |c| {
            c.face_up = true;
            c.matched = true;
        });

        let ids = session.revealable_ids();
        assert_eq!(ids.len(), 14);
        assert!(!ids.contains(&CardId::new(2)));
        assert!(!ids.contains(&CardId::new(5)));
    }
}
