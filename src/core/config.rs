//! Engine configuration.
//!
//! - `GridSize`: the three supported board sizes
//! - `GameMode`: solo, local two-player, or versus the CPU
//! - `EngineConfig`: everything a new game needs, loadable from TOML
//!
//! ```
//! use memory_engine::core::{EngineConfig, GameMode, GridSize};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     grid_size = 24
//!     mode = "vs-cpu"
//!     cpu_difficulty = 0.5
//! "#).unwrap();
//!
//! assert_eq!(config.grid_size, GridSize::Medium);
//! assert_eq!(config.mode, GameMode::VsCpu);
//! assert_eq!(config.settle_delay_ms, 1000);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::EngineError;
use super::player::PlayerId;

/// Default probability that the CPU acts on a pair it remembers.
pub const DEFAULT_CPU_DIFFICULTY: f64 = 0.7;

/// Supported board sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    /// 4x4, 8 pairs.
    #[default]
    Small,
    /// 6x4, 12 pairs.
    Medium,
    /// 6x6, 18 pairs.
    Large,
}

impl GridSize {
    /// All sizes, smallest first.
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Large];

    /// Number of cards on the board.
    #[must_use]
    pub const fn cards(self) -> usize {
        match self {
            GridSize::Small => 16,
            GridSize::Medium => 24,
            GridSize::Large => 36,
        }
    }

    /// Number of distinct symbols (pairs) on the board.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.cards() / 2
    }

    /// Board layout as (columns, rows).
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            GridSize::Small => (4, 4),
            GridSize::Medium => (6, 4),
            GridSize::Large => (6, 6),
        }
    }

    /// Difficulty label reported alongside created games.
    #[must_use]
    pub const fn difficulty_label(self) -> &'static str {
        match self {
            GridSize::Small => "easy",
            GridSize::Medium => "medium",
            GridSize::Large => "hard",
        }
    }
}

impl TryFrom<usize> for GridSize {
    type Error = EngineError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            16 => Ok(GridSize::Small),
            24 => Ok(GridSize::Medium),
            36 => Ok(GridSize::Large),
            _ => Err(EngineError::InvalidGridSize { size }),
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.cards()
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (cols, rows) = self.dimensions();
        write!(f, "{}x{}", cols, rows)
    }
}

/// Who is playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// One player, scored on moves and time.
    #[default]
    Solo,
    /// Two people sharing one board, scored on pairs.
    LocalTwoPlayer,
    /// Player one against the CPU, scored on pairs.
    VsCpu,
}

impl GameMode {
    /// Whether turns alternate and pairs are counted per seat.
    #[must_use]
    pub const fn is_versus(self) -> bool {
        !matches!(self, GameMode::Solo)
    }

    /// The seat driven by the CPU, if any.
    #[must_use]
    pub const fn cpu_seat(self) -> Option<PlayerId> {
        match self {
            GameMode::VsCpu => Some(PlayerId::TWO),
            _ => None,
        }
    }
}

/// Complete configuration for a game.
///
/// Delays are fixed, non-zero presentation pacing; the engine only uses them
/// to schedule deferred transitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board size.
    pub grid_size: GridSize,

    /// Player arrangement.
    pub mode: GameMode,

    /// Probability that the CPU acts on a remembered pair (`0.0..=1.0`).
    pub cpu_difficulty: f64,

    /// Pause between a mismatch and the cards turning back down. Also the
    /// pause before the CPU starts its move.
    pub settle_delay_ms: u64,

    /// Pause between the CPU's first and second reveal.
    pub cpu_reveal_delay_ms: u64,

    /// Interval of the elapsed-time tick in solo games.
    pub tick_interval_ms: u64,

    /// RNG seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::Small,
            mode: GameMode::Solo,
            cpu_difficulty: DEFAULT_CPU_DIFFICULTY,
            settle_delay_ms: 1000,
            cpu_reveal_delay_ms: 800,
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the CPU difficulty. Checked by `validate`.
    #[must_use]
    pub fn with_cpu_difficulty(mut self, difficulty: f64) -> Self {
        self.cpu_difficulty = difficulty;
        self
    }

    /// Set the settle delay in milliseconds.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Set the delay between the CPU's two reveals in milliseconds.
    #[must_use]
    pub fn with_cpu_reveal_delay_ms(mut self, ms: u64) -> Self {
        self.cpu_reveal_delay_ms = ms;
        self
    }

    /// Set the tick interval in milliseconds.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn cpu_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_reveal_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.cpu_difficulty) {
            return Err(EngineError::InvalidDifficulty {
                value: self.cpu_difficulty,
            });
        }

        for (name, value) in [
            ("settle_delay_ms", self.settle_delay_ms),
            ("cpu_reveal_delay_ms", self.cpu_reveal_delay_ms),
            ("tick_interval_ms", self.tick_interval_ms),
        ] {
            if value == 0 {
                return Err(EngineError::ZeroDelay { name });
            }
        }

        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(content).map_err(|e| EngineError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        debug!("Loading engine config");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| EngineError::Config {
            message: format!("Failed to read config file: {}", e),
        })?;
        Self::from_toml_str(&content)
    }
}
