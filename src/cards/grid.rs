//! Grid generation.
//!
//! Builds the face-down board for a new game: the first `size / 2` catalog
//! symbols, each duplicated once, uniformly shuffled, with ids assigned by
//! final position.

use im::Vector;
use tracing::{debug, instrument};

use super::card::{Card, CardId, Symbol};
use super::catalog::SymbolCatalog;
use crate::core::{EngineError, GridSize, RandomSource};

/// Deals shuffled boards from a symbol catalog.
#[derive(Clone, Debug, Default)]
pub struct GridGenerator {
    catalog: SymbolCatalog,
}

impl GridGenerator {
    #[must_use]
    pub fn new(catalog: SymbolCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog symbols are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Deal a board for a raw card count. Rejects anything but 16, 24, 36.
    pub fn generate_for_count<R: RandomSource>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<Vector<Card>, EngineError> {
        let grid_size = GridSize::try_from(size)?;
        self.generate(grid_size, rng)
    }

    /// Deal a shuffled board.
    ///
    /// Every symbol appears exactly twice and ids run `0..size` in board order.
    #[instrument(skip(self, rng), fields(grid = %grid_size))]
    pub fn generate<R: RandomSource>(
        &self,
        grid_size: GridSize,
        rng: &mut R,
    ) -> Result<Vector<Card>, EngineError> {
        let symbols = self.catalog.take(grid_size.pairs())?;

        let mut deck: Vec<Symbol> = symbols.iter().chain(symbols.iter()).copied().collect();
        rng.shuffle(&mut deck);

        debug!(cards = deck.len(), "Dealt board");

        Ok(deck
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card::new(CardId::new(i as u32), symbol))
            .collect())
    }
}
