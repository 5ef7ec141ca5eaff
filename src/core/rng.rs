//! Injectable randomness for grid shuffling and CPU decisions.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical decks and CPU rolls
//! - **Injectable**: Engine code only sees the `RandomSource` trait
//! - **Serializable**: O(1) state capture and restore for replays
//!
//! ```
//! use memory_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_index(36), b.gen_index(36));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness threaded through the grid generator and CPU agent.
///
/// Implementors only supply `gen_bool` and `gen_index`; shuffling and
/// choosing are derived from `gen_index` so any source yields unbiased
/// permutations.
pub trait RandomSource {
    /// Return `true` with the given probability (`0.0..=1.0`).
    fn gen_bool(&mut self, probability: f64) -> bool;

    /// Uniform index in `0..len`. `len` is never zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Shuffle a slice in place (Fisher–Yates).
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Choose a uniformly random element from a slice.
    fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let index = self.gen_index(slice.len());
        slice.get(index)
    }
}

/// Seeded ChaCha8 random source.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from OS entropy. The drawn seed is kept so the game
    /// can be replayed from its log line.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted random source for tests and replays.
///
/// Answers come from the queued booleans and indices in order; once a queue
/// runs dry it answers `false` and `0`. Shuffling leaves the slice untouched,
/// so a generated grid keeps catalog order: card `i` pairs with card
/// `i + size / 2`.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    bools: VecDeque<bool>,
    indices: VecDeque<usize>,
}

impl SequenceRng {
    pub fn new(
        bools: impl IntoIterator<Item = bool>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            bools: bools.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Queue another boolean answer.
    pub fn push_bool(&mut self, value: bool) {
        self.bools.push_back(value);
    }

    /// Queue another index answer. Values are reduced modulo the requested length.
    pub fn push_index(&mut self, value: usize) {
        self.indices.push_back(value);
    }
}

impl RandomSource for SequenceRng {
    fn gen_bool(&mut self, probability: f64) -> bool {
        // Certain outcomes never consume a scripted answer.
        if probability >= 1.0 {
            return true;
        }
        if probability <= 0.0 {
            return false;
        }
        self.bools.pop_front().unwrap_or(false)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }

    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}
