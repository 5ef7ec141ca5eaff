//! Game driver: owns the session, CPU, scheduler and randomness, and
//! publishes events and snapshots for the presentation layer.

mod game;
mod events;

pub use game::{Game, RevealOutcome};
pub use events::GameEvent;
