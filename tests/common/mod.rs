//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use memory_engine::core::{EngineConfig, GameMode, GridSize, SequenceRng};
use memory_engine::engine::{Game, GameEvent};
use memory_engine::schedule::ManualScheduler;

pub type TestGame = Game<ManualScheduler, SequenceRng>;

/// Route engine logs through the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Game on virtual time over an unshuffled board: card i shows
/// `Symbol(i % pairs)` and pairs with card `i + pairs`.
pub fn unshuffled(grid_size: GridSize, mode: GameMode) -> TestGame {
    init_tracing();
    let config = EngineConfig::new().with_grid_size(grid_size).with_mode(mode);
    Game::with_rng(config, SequenceRng::default()).unwrap()
}

/// Same as `unshuffled` with scripted CPU rolls and picks.
pub fn scripted(mode: GameMode, bools: Vec<bool>, indices: Vec<usize>) -> TestGame {
    init_tracing();
    let config = EngineConfig::new().with_mode(mode);
    Game::with_rng(config, SequenceRng::new(bools, indices)).unwrap()
}

/// Events drained from the game, minus clock ticks.
pub fn drain(game: &mut TestGame) -> Vec<GameEvent> {
    game.take_events()
        .into_iter()
        .filter(|e| !matches!(e, GameEvent::ClockTick { .. }))
        .collect()
}
