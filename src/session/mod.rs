//! Session state machine: reveal, resolve, turn, win.
//!
//! - `Session`: authoritative record of one game
//! - `MatchEvaluator`: compares and applies revealed pairs
//! - `TurnController`: match keeps the turn, mismatch passes it
//! - `WinDetector` / `ScoreCalculator`: completion and solo scoring
//! - `SessionSnapshot`: redraw data for the presentation layer
//!
//! These types are synchronous and clock-free; deferred transitions are
//! driven by `engine::Game`.

pub mod state;
pub mod evaluator;
pub mod turn;
pub mod scoring;
pub mod snapshot;

pub use state::{Actor, IgnoreReason, Reveal, Session, SessionStatus};
pub use evaluator::{MatchEvaluator, PairResult};
pub use turn::TurnController;
pub use scoring::{GameOutcome, ScoreCalculator, WinDetector};
pub use snapshot::{CardView, SessionSnapshot};
