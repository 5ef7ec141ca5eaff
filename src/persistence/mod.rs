//! Hand-off of finished games to the persistence collaborator.
//!
//! The engine only produces `FinishedGameRecord`s; storage, ids and
//! leaderboards belong to whoever implements `PersistenceCollaborator`.
//! Failures here never change a game's outcome.

pub mod record;
pub mod store;

pub use record::{FinishedGameRecord, GameId, LeaderboardEntry, PersistenceError};
pub use store::{InMemoryStore, PersistenceCollaborator, DEFAULT_LEADERBOARD_LIMIT};
