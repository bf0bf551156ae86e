use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::Cell;
use crate::input::Direction;

/// Default board edge in pixels, as laid out by the rendering side.
pub const DEFAULT_BOARD_SIZE_PX: u32 = 400;

/// Default cell edge in pixels.
pub const DEFAULT_CELL_SIZE_PX: u32 = 20;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 80;

/// Interval reduction applied at each score threshold.
pub const TICK_INTERVAL_STEP_MS: u64 = 5;

/// Score multiple at which the game speeds up.
pub const SCORE_PER_SPEED_STEP: u32 = 50;

/// Points granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Random samples tried before food placement gives up looking for a free cell.
pub const MAX_FOOD_ATTEMPTS: u32 = 100;

/// Starting head cell for a fresh session.
pub const DEFAULT_START_CELL: Cell = Cell { col: 10, row: 10 };

/// Invalid configuration detected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("board of {board_px}px holds no {cell_px}px cells")]
    EmptyGrid { board_px: u32, cell_px: u32 },
    #[error("{0} must be non-zero")]
    ZeroValue(&'static str),
    #[error("minimum speed {min_ms}ms exceeds initial speed {initial_ms}ms")]
    SpeedFloorAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("start cell ({col}, {row}) lies outside a {grid_count}x{grid_count} grid")]
    StartOutOfBounds { col: i32, row: i32, grid_count: i32 },
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Construction-time settings for one game.
///
/// Missing fields in a JSON config fall back to the defaults above.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size_px: u32,
    pub cell_size_px: u32,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_step_ms: u64,
    pub score_threshold: u32,
    pub points_per_food: u32,
    pub max_food_attempts: u32,
    pub start_cell: Cell,
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size_px: DEFAULT_BOARD_SIZE_PX,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            initial_speed_ms: DEFAULT_TICK_INTERVAL_MS,
            min_speed_ms: MIN_TICK_INTERVAL_MS,
            speed_step_ms: TICK_INTERVAL_STEP_MS,
            score_threshold: SCORE_PER_SPEED_STEP,
            points_per_food: POINTS_PER_FOOD,
            max_food_attempts: MAX_FOOD_ATTEMPTS,
            start_cell: DEFAULT_START_CELL,
            initial_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Creates a default config for a square grid of `grid_count` cells per side.
    #[must_use]
    pub fn with_grid_count(grid_count: u32) -> Self {
        let cell_size_px = DEFAULT_CELL_SIZE_PX;
        let half = i32::try_from(grid_count / 2).unwrap_or(i32::MAX);

        Self {
            board_size_px: grid_count.saturating_mul(cell_size_px),
            cell_size_px,
            start_cell: Cell::new(half, half),
            ..Self::default()
        }
    }

    /// Loads a JSON config file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of cells along each side of the square grid.
    ///
    /// Returns 0 for a zero cell size; `validate` rejects that case.
    #[must_use]
    pub fn grid_count(&self) -> i32 {
        self.board_size_px
            .checked_div(self.cell_size_px)
            .and_then(|count| i32::try_from(count).ok())
            .unwrap_or(0)
    }

    /// Checks every field for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let grid_count = self.grid_count();
        if grid_count == 0 {
            return Err(ConfigError::EmptyGrid {
                board_px: self.board_size_px,
                cell_px: self.cell_size_px,
            });
        }

        let required = [
            ("min_speed_ms", self.min_speed_ms),
            ("speed_step_ms", self.speed_step_ms),
            ("score_threshold", u64::from(self.score_threshold)),
            ("points_per_food", u64::from(self.points_per_food)),
            ("max_food_attempts", u64::from(self.max_food_attempts)),
        ];
        for (name, value) in required {
            if value == 0 {
                return Err(ConfigError::ZeroValue(name));
            }
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::SpeedFloorAboveInitial {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }

        let Cell { col, row } = self.start_cell;
        if col < 0 || row < 0 || col >= grid_count || row >= grid_count {
            return Err(ConfigError::StartOutOfBounds {
                col,
                row,
                grid_count,
            });
        }

        Ok(())
    }
}
