//! Engine error types.
//!
//! Only invalid input produces an error. Input that is merely illegal in the
//! current state (double clicks, stale taps, out-of-turn reveals) is reported
//! as an ignored outcome instead, see `session::IgnoreReason`.

use derive_more::{Display, Error};

use crate::cards::CardId;

/// Invalid input rejected by the engine. The session is never modified when
/// one of these is returned.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum EngineError {
    /// Grid size outside 16, 24, 36.
    #[display("grid size {size} is not one of 16, 24 or 36")]
    InvalidGridSize { size: usize },

    /// Card id past the end of the grid.
    #[display("{id} is out of range for a {len}-card grid")]
    CardOutOfRange { id: CardId, len: usize },

    /// CPU difficulty outside `0.0..=1.0` (or NaN).
    #[display("cpu difficulty {value} is outside 0.0..=1.0")]
    InvalidDifficulty { value: f64 },

    /// Catalog cannot cover the requested number of pairs.
    #[display("symbol catalog has {available} symbols but {required} are required")]
    CatalogTooSmall { available: usize, required: usize },

    /// Catalog contains the same glyph twice.
    #[display("symbol catalog repeats glyph {glyph:?}")]
    DuplicateSymbol { glyph: String },

    /// A configured delay of zero.
    #[display("{name} must be greater than zero")]
    ZeroDelay { name: &'static str },

    /// Configuration file could not be read or parsed.
    #[display("config error: {message}")]
    Config { message: String },
}
