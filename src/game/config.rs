use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest grid size offered by the settings panel
pub const MIN_GRID_SIZE: usize = 5;
/// Largest grid size offered by the settings panel
pub const MAX_GRID_SIZE: usize = 29;
/// Largest grid size accepted at all, keeping map indices and cell counts small
pub const GRID_SIZE_LIMIT: usize = 1023;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, odd
    pub grid_size: usize,
    /// Number of segments laid out on every snake reset
    pub snake_start_length: usize,
    /// Whether a game over immediately lays out a fresh snake
    pub restart_on_game_over: bool,

    // Harness timing
    /// Milliseconds between logical moves
    pub tick_millis: u64,
    /// Duration of the eased move between two cells
    pub animation_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            snake_start_length: 3,
            restart_on_game_over: true,
            tick_millis: 250,
            animation_millis: 150,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size and snake length
    pub fn new(grid_size: usize, snake_start_length: usize) -> Self {
        Self {
            grid_size,
            snake_start_length,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Number of cells on the board
    pub fn capacity(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }

    /// Check the grid size alone
    pub fn validate_grid_size(grid_size: usize) -> Result<(), ConfigError> {
        if grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if grid_size > GRID_SIZE_LIMIT {
            return Err(ConfigError::GridTooLarge {
                size: grid_size,
                limit: GRID_SIZE_LIMIT,
            });
        }
        if grid_size % 2 == 0 {
            return Err(ConfigError::EvenGridSize(grid_size));
        }
        Ok(())
    }

    /// Check that the snake can be laid out on the board
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_grid_size(self.grid_size)?;
        if self.snake_start_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.snake_start_length > self.capacity() {
            return Err(ConfigError::Capacity {
                length: self.snake_start_length,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }
}
