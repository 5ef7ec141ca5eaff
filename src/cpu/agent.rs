//! CPU opponent with fallible memory.
//!
//! ## Decision policy
//!
//! At the start of a move:
//! 1. If memory holds a known pair, take it with probability `difficulty`.
//! 2. Otherwise reveal a random face-down card, then take its remembered
//!    partner with probability `difficulty`, else another random card.
//!
//! The agent only plans; `engine::Game` performs the reveals and spaces them
//! out in time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::CpuMemory;
use crate::cards::{CardId, Symbol};
use crate::core::{EngineError, PlayerId, RandomSource};
use crate::session::Session;

/// Opening decision for a CPU move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuPlan {
    /// Reveal a remembered pair: first now, second after the reveal delay.
    KnownPair(CardId, CardId),
    /// Reveal this card, then pick the second one with `choose_second`.
    Explore(CardId),
    /// Nothing revealable.
    Yield,
}

/// The CPU seat in vs-cpu games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuAgent {
    seat: PlayerId,
    difficulty: f64,
    memory: CpuMemory,
}

impl CpuAgent {
    /// Create an agent with empty memory. `difficulty` must lie in `0.0..=1.0`.
    pub fn new(seat: PlayerId, difficulty: f64) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&difficulty) {
            return Err(EngineError::InvalidDifficulty { value: difficulty });
        }
        Ok(Self {
            seat,
            difficulty,
            memory: CpuMemory::new(),
        })
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    #[must_use]
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    #[must_use]
    pub fn memory(&self) -> &CpuMemory {
        &self.memory
    }

    /// Watch a card turn over, whoever revealed it.
    pub fn observe(&mut self, card: CardId, symbol: Symbol) {
        self.memory.observe(card, symbol);
    }

    /// Forget a matched pair.
    pub fn forget_pair(&mut self, first: CardId, second: CardId) {
        self.memory.forget(first);
        self.memory.forget(second);
    }

    /// Decide how to open a move.
    pub fn plan<R: RandomSource>(&self, session: &Session, rng: &mut R) -> CpuPlan {
        if let Some((first, second)) = self.memory.known_pair(session) {
            if rng.gen_bool(self.difficulty) {
                debug!(%first, %second, "CPU recalls a pair");
                return CpuPlan::KnownPair(first, second);
            }
            debug!(%first, %second, "CPU forgets a known pair");
        }

        match rng.choose(&session.revealable_ids()) {
            Some(&card) => CpuPlan::Explore(card),
            None => CpuPlan::Yield,
        }
    }

    /// Pick the second card after exploring `first`.
    ///
    /// Returns `None` when no other card can be revealed.
    pub fn choose_second<R: RandomSource>(
        &self,
        session: &Session,
        first: CardId,
        rng: &mut R,
    ) -> Option<CardId> {
        let symbol = session.card(first)?.symbol;

        if let Some(partner) = self.memory.partner_of(first, symbol, session) {
            if rng.gen_bool(self.difficulty) {
                debug!(%first, %partner, "CPU recalls the partner");
                return Some(partner);
            }
        }

        let remaining: Vec<CardId> = session
            .revealable_ids()
            .into_iter()
            .filter(|&id| id != first)
            .collect();
        rng.choose(&remaining).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::GridGenerator;
    use crate::core::{GameMode, GameRng, GridSize, SequenceRng};
    use crate::session::{Actor, TurnController};

    /// Unshuffled vs-cpu board with the CPU to move. Card i pairs with i + 8.
    fn cpu_turn_session() -> Session {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, GameMode::VsCpu);
        session.start();
        TurnController::after_pair(&mut session, false);
        session
    }

    fn agent_with_memory(difficulty: f64, ids: &[u32]) -> CpuAgent {
        let mut agent = CpuAgent::new(PlayerId::TWO, difficulty).unwrap();
        for &id in ids {
            agent.observe(CardId::new(id), Symbol::new((id % 8) as u16));
        }
        agent
    }

    #[test]
    fn test_rejects_bad_difficulty() {
        assert!(CpuAgent::new(PlayerId::TWO, 1.01).is_err());
        assert!(CpuAgent::new(PlayerId::TWO, -0.5).is_err());
        assert!(CpuAgent::new(PlayerId::TWO, f64::NAN).is_err());
        assert!(CpuAgent::new(PlayerId::TWO, 0.0).is_ok());
    }

    #[test]
    fn test_full_difficulty_always_takes_known_pair() {
        let session = cpu_turn_session();
        let agent = agent_with_memory(1.0, &[3, 6, 11]);
        let mut rng = GameRng::new(0);

        for _ in 0..500 {
            assert_eq!(
                agent.plan(&session, &mut rng),
                CpuPlan::KnownPair(CardId::new(3), CardId::new(11))
            );
        }
    }

    #[test]
    fn test_zero_difficulty_never_takes_known_pair() {
        let session = cpu_turn_session();
        let agent = agent_with_memory(0.0, &[3, 6, 11]);
        let mut rng = GameRng::new(0);

        for _ in 0..500 {
            assert!(matches!(agent.plan(&session, &mut rng), CpuPlan::Explore(_)));
        }
    }

    #[test]
    fn test_declined_roll_explores() {
        let session = cpu_turn_session();
        let agent = agent_with_memory(0.5, &[3, 11]);
        let mut rng = SequenceRng::new([false], [4]);

        assert_eq!(agent.plan(&session, &mut rng), CpuPlan::Explore(CardId::new(4)));
    }

    #[test]
    fn test_explore_only_revealable() {
        let mut session = cpu_turn_session();
        session.reveal(CardId::new(0), Actor::Cpu).unwrap();
        let agent = agent_with_memory(0.7, &[]);
        let mut rng = GameRng::new(11);

        for _ in 0..200 {
            match agent.plan(&session, &mut rng) {
                CpuPlan::Explore(id) => assert_ne!(id, CardId::new(0)),
                other => panic!("unexpected plan {:?}", other),
            }
        }
    }

    #[test]
    fn test_second_uses_partner_after_fresh_observation() {
        let mut session = cpu_turn_session();
        let mut agent = agent_with_memory(1.0, &[13]);

        session.reveal(CardId::new(5), Actor::Cpu).unwrap();
        agent.observe(CardId::new(5), Symbol::new(5));

        let second = agent.choose_second(&session, CardId::new(5), &mut GameRng::new(1));
        assert_eq!(second, Some(CardId::new(13)));
    }

    #[test]
    fn test_second_falls_back_to_random() {
        let mut session = cpu_turn_session();
        let agent = agent_with_memory(0.0, &[13]);
        session.reveal(CardId::new(5), Actor::Cpu).unwrap();

        // Revealable excluding 5: [0, 1, 2, 3, 4, 6, ...]; index 5 is card 6.
        let mut rng = SequenceRng::new([], [5]);
        let second = agent.choose_second(&session, CardId::new(5), &mut rng);
        assert_eq!(second, Some(CardId::new(6)));
    }

    #[test]
    fn test_second_never_repeats_first() {
        let mut session = cpu_turn_session();
        let agent = agent_with_memory(0.7, &[]);
        session.reveal(CardId::new(7), Actor::Cpu).unwrap();
        let mut rng = GameRng::new(5);

        for _ in 0..200 {
            let second = agent.choose_second(&session, CardId::new(7), &mut rng).unwrap();
            assert_ne!(second, CardId::new(7));
        }
    }

    #[test]
    fn test_forget_pair() {
        let mut agent = agent_with_memory(0.7, &[2, 10, 4]);
        agent.forget_pair(CardId::new(2), CardId::new(10));
        assert_eq!(agent.memory().len(), 1);
        assert_eq!(agent.memory().recall(CardId::new(4)), Some(Symbol::new(4)));
    }
}
