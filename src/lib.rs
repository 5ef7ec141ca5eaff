//! # memory-engine
//!
//! Session engine for a tile-matching memory card game: a grid of face-down
//! cards hiding pairs of symbols, played solo against the clock, by two
//! people sharing one device, or against a CPU opponent with an imperfect
//! memory.
//!
//! ## Design Principles
//!
//! 1. **One Writer**: a single `Game` owns the session. Input, timers and the
//!    CPU all mutate it through the same entry points, one at a time.
//!
//! 2. **Cancellable Time**: every delayed effect (mismatch settle, CPU move,
//!    clock tick) is a `DeferredTask` held by a `Scheduler`. Starting a new
//!    game cancels them all.
//!
//! 3. **Injected Randomness**: shuffling and CPU decisions draw from a
//!    `RandomSource`, so tests can script every roll.
//!
//! ## Modules
//!
//! - `core`: Seats, scoreboard, RNG, configuration, errors
//! - `cards`: Cards, symbol catalog, grid generation
//! - `session`: Session state, pair evaluation, turns, scoring, snapshots
//! - `cpu`: CPU memory and move planning
//! - `schedule`: Deferred tasks and schedulers (virtual and wall clock)
//! - `engine`: The `Game` driver and its events
//! - `persistence`: Finished-game records and the storage contract

pub mod core;
pub mod cards;
pub mod session;
pub mod cpu;
pub mod schedule;
pub mod engine;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Scoreboard,
    GameRng, GameRngState, RandomSource, SequenceRng,
    EngineConfig, GameMode, GridSize,
    EngineError,
};

pub use crate::cards::{Card, CardId, Symbol, SymbolCatalog, GridGenerator};

pub use crate::session::{
    Actor, IgnoreReason, Reveal, Session, SessionStatus,
    MatchEvaluator, PairResult, TurnController,
    GameOutcome, ScoreCalculator, WinDetector,
    CardView, SessionSnapshot,
};

pub use crate::cpu::{CpuAgent, CpuMemory, CpuPlan};

pub use crate::schedule::{DeferredTask, ManualScheduler, Scheduler, SystemScheduler, TaskId};

pub use crate::engine::{Game, GameEvent, RevealOutcome};

pub use crate::persistence::{
    FinishedGameRecord, GameId, LeaderboardEntry, PersistenceError,
    InMemoryStore, PersistenceCollaborator,
};
