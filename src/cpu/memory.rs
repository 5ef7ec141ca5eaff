//! What the CPU has seen.
//!
//! Every reveal, by either seat, is observed. Matched cards are forgotten
//! as soon as their pair resolves so they are never offered as guesses.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Symbol};
use crate::session::Session;

/// Card id to symbol for every unmatched card the CPU has watched turn over.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuMemory {
    seen: FxHashMap<CardId, Symbol>,
}

impl CpuMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a revealed card.
    pub fn observe(&mut self, card: CardId, symbol: Symbol) {
        self.seen.insert(card, symbol);
    }

    /// Drop a card, typically because it was matched.
    pub fn forget(&mut self, card: CardId) {
        self.seen.remove(&card);
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    #[must_use]
    pub fn recall(&self, card: CardId) -> Option<Symbol> {
        self.seen.get(&card).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Two remembered, still-revealable cards sharing a symbol.
    ///
    /// Ties break on the lowest first id; the returned pair is ordered
    /// `(lower, higher)`.
    #[must_use]
    pub fn known_pair(&self, session: &Session) -> Option<(CardId, CardId)> {
        let mut first_seen: FxHashMap<Symbol, CardId> = FxHashMap::default();
        let mut best: Option<(CardId, CardId)> = None;

        let mut ids: Vec<CardId> = self
            .seen
            .keys()
            .copied()
            .filter(|&id| is_revealable(session, id))
            .collect();
        ids.sort_unstable();

        for id in ids {
            let symbol = self.seen[&id];
            match first_seen.get(&symbol) {
                Some(&lower) => {
                    if best.map_or(true, |(b, _)| lower < b) {
                        best = Some((lower, id));
                    }
                }
                None => {
                    first_seen.insert(symbol, id);
                }
            }
        }

        best
    }

    /// A remembered, still-revealable card other than `card` showing
    /// `symbol`. Lowest id wins.
    #[must_use]
    pub fn partner_of(&self, card: CardId, symbol: Symbol, session: &Session) -> Option<CardId> {
        self.seen
            .iter()
            .filter(|&(&id, &s)| id != card && s == symbol && is_revealable(session, id))
            .map(|(&id, _)| id)
            .min()
    }
}

fn is_revealable(session: &Session, id: CardId) -> bool {
    session.card(id).is_some_and(|c| c.is_revealable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::GridGenerator;
    use crate::core::{GameMode, GridSize, SequenceRng};
    use crate::session::{Actor, MatchEvaluator};

    /// Unshuffled board: card i shows Symbol(i % 8).
    fn session() -> Session {
        let cards = GridGenerator::default()
            .generate(GridSize::Small, &mut SequenceRng::default())
            .unwrap();
        let mut session = Session::new(cards, GridSize::Small, GameMode::VsCpu);
        session.start();
        session
    }

    fn observe(memory: &mut CpuMemory, ids: &[u32]) {
        for &id in ids {
            memory.observe(CardId::new(id), Symbol::new((id % 8) as u16));
        }
    }

    #[test]
    fn test_observe_and_forget() {
        let mut memory = CpuMemory::new();
        observe(&mut memory, &[1, 9]);
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.recall(CardId::new(9)), Some(Symbol::new(1)));

        memory.forget(CardId::new(9));
        assert_eq!(memory.recall(CardId::new(9)), None);

        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_no_known_pair() {
        let mut memory = CpuMemory::new();
        observe(&mut memory, &[0, 1, 2, 3]);
        assert_eq!(memory.known_pair(&session()), None);
    }

    #[test]
    fn test_known_pair_lowest_first_id() {
        let mut memory = CpuMemory::new();
        observe(&mut memory, &[13, 5, 10, 2, 7]);

        // Pairs: (2, 10) and (5, 13).
        assert_eq!(
            memory.known_pair(&session()),
            Some((CardId::new(2), CardId::new(10)))
        );
    }

    #[test]
    fn test_known_pair_skips_matched() {
        let mut session = session();
        session.reveal(CardId::new(2), Actor::Human).unwrap();
        session.reveal(CardId::new(10), Actor::Human).unwrap();
        MatchEvaluator::resolve(&mut session).unwrap();

        let mut memory = CpuMemory::new();
        observe(&mut memory, &[2, 10, 5, 13]);

        assert_eq!(
            memory.known_pair(&session),
            Some((CardId::new(5), CardId::new(13)))
        );
    }

    #[test]
    fn test_partner_of() {
        let mut memory = CpuMemory::new();
        observe(&mut memory, &[4, 12, 6]);
        let session = session();

        assert_eq!(
            memory.partner_of(CardId::new(4), Symbol::new(4), &session),
            Some(CardId::new(12))
        );
        assert_eq!(memory.partner_of(CardId::new(6), Symbol::new(6), &session), None);
    }

    #[test]
    fn test_partner_must_be_face_down() {
        let mut session = session();
        session.reveal(CardId::new(12), Actor::Human).unwrap();

        let mut memory = CpuMemory::new();
        observe(&mut memory, &[4, 12]);

        assert_eq!(memory.partner_of(CardId::new(4), Symbol::new(4), &session), None);
    }
}
