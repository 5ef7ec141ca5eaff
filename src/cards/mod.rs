//! Card model, symbol catalog, and grid generation.
//!
//! ## Key Types
//!
//! - `CardId`: Board position of a card
//! - `Symbol`: Opaque token shared by exactly two cards
//! - `Card`: Face-up and matched flags for one position
//! - `SymbolCatalog`: Glyph lookup for symbols
//! - `GridGenerator`: Deals shuffled boards

pub mod card;
pub mod catalog;
pub mod grid;

pub use card::{Card, CardId, Symbol};
pub use catalog::{SymbolCatalog, DEFAULT_GLYPHS};
pub use grid::GridGenerator;
