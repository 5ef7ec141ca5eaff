//! Persistence collaborator contract and an in-memory implementation.

use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use super::record::{FinishedGameRecord, GameId, LeaderboardEntry, PersistenceError};
use crate::core::GridSize;

/// Default number of leaderboard rows.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Stores finished games and serves leaderboards.
///
/// The engine never issues game ids: the caller creates a game here, attaches
/// the id to the running `Game`, and the engine submits the record on a solo
/// win.
pub trait PersistenceCollaborator {
    /// Register a new game and issue its id.
    fn create_game(
        &mut self,
        player: &str,
        grid_size: GridSize,
        difficulty: &str,
    ) -> Result<GameId, PersistenceError>;

    /// Store the record of a finished game.
    fn submit(&mut self, game_id: GameId, record: &FinishedGameRecord)
        -> Result<(), PersistenceError>;

    /// Completed games, best score first, ties broken by faster time.
    fn leaderboard(
        &self,
        grid_size: Option<GridSize>,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, PersistenceError>;
}

#[derive(Clone, Debug)]
struct StoredGame {
    player: String,
    grid_size: GridSize,
    difficulty: String,
    record: Option<FinishedGameRecord>,
}

/// Process-local store. Useful for tests and offline play.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    games: FxHashMap<GameId, StoredGame>,
    next_id: u64,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for a game, if it has been submitted.
    #[must_use]
    pub fn record(&self, game_id: GameId) -> Option<&FinishedGameRecord> {
        self.games.get(&game_id).and_then(|g| g.record.as_ref())
    }

    /// Difficulty label a game was created with.
    #[must_use]
    pub fn difficulty(&self, game_id: GameId) -> Option<&str> {
        self.games.get(&game_id).map(|g| g.difficulty.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl PersistenceCollaborator for InMemoryStore {
    #[instrument(skip(self))]
    fn create_game(
        &mut self,
        player: &str,
        grid_size: GridSize,
        difficulty: &str,
    ) -> Result<GameId, PersistenceError> {
        if player.trim().is_empty() {
            return Err(PersistenceError::new("player name is required"));
        }

        self.next_id += 1;
        let id = GameId(self.next_id);
        self.games.insert(
            id,
            StoredGame {
                player: player.to_string(),
                grid_size,
                difficulty: difficulty.to_string(),
                record: None,
            },
        );
        debug!(%id, "Game created");
        Ok(id)
    }

    #[instrument(skip(self, record), fields(score = record.score))]
    fn submit(
        &mut self,
        game_id: GameId,
        record: &FinishedGameRecord,
    ) -> Result<(), PersistenceError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| PersistenceError::new(format!("unknown game {}", game_id)))?;
        game.record = Some(*record);
        debug!("Record stored");
        Ok(())
    }

    fn leaderboard(
        &self,
        grid_size: Option<GridSize>,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        let mut rows: Vec<LeaderboardEntry> = self
            .games
            .iter()
            .filter(|(_, g)| grid_size.map_or(true, |size| g.grid_size == size))
            .filter_map(|(&id, g)| {
                let record = g.record.filter(|r| r.completed)?;
                Some(LeaderboardEntry {
                    game_id: id,
                    player: g.player.clone(),
                    grid_size: g.grid_size,
                    score: record.score,
                    elapsed_seconds: record.elapsed_seconds,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.elapsed_seconds.cmp(&b.elapsed_seconds))
                .then(a.game_id.cmp(&b.game_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
