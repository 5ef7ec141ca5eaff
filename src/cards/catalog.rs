//! Symbol catalog for glyph lookup.
//!
//! The grid generator draws its symbols from a catalog; the presentation
//! layer resolves `Symbol` tokens back to glyphs through the same catalog.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::Symbol;
use crate::core::EngineError;

/// Glyphs of the default catalog. Enough for the largest (36-card) board.
pub const DEFAULT_GLYPHS: [&str; 24] = [
    "⚡", "🔥", "💧", "🌿", "🔮", "🛡️", "⚔️", "🏹",
    "🐲", "🦄", "🦁", "🐺", "💀", "💎", "🩸", "🪐",
    "👑", "💍", "🧿", "🧩", "🚀", "🛸", "👾", "🤖",
];

/// Ordered list of distinct glyphs. `Symbol(n)` is the n-th glyph.
///
/// ## Example
///
/// ```
/// use memory_engine::cards::{Symbol, SymbolCatalog};
///
/// let catalog = SymbolCatalog::new(["A", "B", "C"]).unwrap();
/// assert_eq!(catalog.glyph(Symbol::new(1)), Some("B"));
/// assert_eq!(catalog.glyph(Symbol::new(9)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    glyphs: Vec<String>,
}

impl SymbolCatalog {
    /// Build a catalog, rejecting repeated glyphs.
    pub fn new<I, S>(glyphs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<String> = glyphs.into_iter().map(Into::into).collect();

        let mut seen = FxHashSet::default();
        for glyph in &glyphs {
            if !seen.insert(glyph.as_str()) {
                return Err(EngineError::DuplicateSymbol {
                    glyph: glyph.clone(),
                });
            }
        }

        Ok(Self { glyphs })
    }

    /// Number of symbols available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a symbol token.
    #[must_use]
    pub fn glyph(&self, symbol: Symbol) -> Option<&str> {
        self.glyphs.get(symbol.0 as usize).map(String::as_str)
    }

    /// The first `count` symbols, or an error if the catalog is too small.
    pub fn take(&self, count: usize) -> Result<Vec<Symbol>, EngineError> {
        if count > self.glyphs.len() {
            return Err(EngineError::CatalogTooSmall {
                available: self.glyphs.len(),
                required: count,
            });
        }
        Ok((0..count).map(|i| Symbol::new(i as u16)).collect())
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_GLYPHS.iter().map(|g| (*g).to_string()).collect(),
        }
    }
}
