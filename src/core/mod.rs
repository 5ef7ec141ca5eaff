//! Core engine types: seats, randomness, configuration, errors.
//!
//! Nothing in here knows about cards or sessions; the rest of the crate
//! builds on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, Scoreboard};
pub use rng::{GameRng, GameRngState, RandomSource, SequenceRng};
pub use config::{EngineConfig, GameMode, GridSize, DEFAULT_CPU_DIFFICULTY};
pub use error::EngineError;
