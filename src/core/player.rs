//! Seats and per-seat scores.
//!
//! ## PlayerId
//!
//! A memory game has at most two seats. Solo games only ever use the first;
//! versus games alternate between them on mismatches.
//!
//! ## Scoreboard
//!
//! Matched-pair counts indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. `PlayerId(0)` is player one, `PlayerId(1)` player two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The seat that moves first.
    pub const ONE: PlayerId = PlayerId(0);
    /// The second seat (the CPU in vs-cpu games).
    pub const TWO: PlayerId = PlayerId(1);

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing seat.
    ///
    /// ```
    /// use memory_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::ONE.other(), PlayerId::TWO);
    /// assert_eq!(PlayerId::TWO.other(), PlayerId::ONE);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        if self.0 == 0 {
            Self::TWO
        } else {
            Self::ONE
        }
    }

    /// Both seats in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Matched pairs per seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreboard {
    pairs: [u32; 2],
}

impl Scoreboard {
    /// A zeroed scoreboard.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: [0, 0] }
    }

    /// Credit one matched pair to a seat.
    pub fn award_pair(&mut self, player: PlayerId) {
        self.pairs[player.index()] += 1;
    }

    /// Pairs across both seats.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.pairs.iter().sum()
    }

    /// The seat with more pairs, `None` on a draw.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        match self.pairs[0].cmp(&self.pairs[1]) {
            std::cmp::Ordering::Greater => Some(PlayerId::ONE),
            std::cmp::Ordering::Less => Some(PlayerId::TWO),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Iterate over (PlayerId, pairs).
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        PlayerId::both().map(move |p| (p, self.pairs[p.index()]))
    }
}

impl Index<PlayerId> for Scoreboard {
    type Output = u32;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.pairs[player.index()]
    }
}

impl IndexMut<PlayerId> for Scoreboard {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.pairs[player.index()]
    }
}
