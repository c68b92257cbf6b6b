use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;
use super::grid::{Grid, Position};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Number of segments the snake spawns with
    pub initial_snake_length: usize,
    /// Row of the head at spawn
    pub start_row: i32,
    /// Column of the head at spawn
    pub start_col: i32,
    /// Direction the body faces at spawn; the body trails behind it
    pub spawn_direction: Direction,
    /// Segments added per food eaten
    pub growth_per_food: u32,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Accept a 180-degree turn of the head (the snake runs into its own neck)
    pub allow_reversal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 60,
            grid_height: 40,
            initial_snake_length: 4,
            start_row: 1,
            start_col: 4,
            spawn_direction: Direction::Right,
            growth_per_food: 3,
            tick_interval_ms: 100,
            allow_reversal: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// The spawned snake must lie entirely on the grid and leave at least
    /// one cell free for food.
    pub fn validate(&self) -> Result<(), GameError> {
        let grid = Grid::new(self.grid_width, self.grid_height)?;

        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }

        if self.initial_snake_length >= grid.area() {
            return Err(GameError::InvalidConfig(format!(
                "initial_snake_length ({}) leaves no room for food on a {}x{} grid",
                self.initial_snake_length, self.grid_width, self.grid_height
            )));
        }

        // the snake can never hold more segments than the board has cells
        if self.growth_per_food as usize > grid.area() {
            return Err(GameError::InvalidConfig(format!(
                "growth_per_food ({}) exceeds the {} cells of the grid",
                self.growth_per_food,
                grid.area()
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }

        let head = Position::new(self.start_row, self.start_col);
        if !grid.contains(head) {
            return Err(GameError::InvalidConfig(format!(
                "spawn ({}, {}) is outside the {}x{} grid",
                self.start_row, self.start_col, self.grid_width, self.grid_height
            )));
        }

        let (d_row, d_col) = self.spawn_direction.delta();
        let trail = (self.initial_snake_length - 1) as i32;
        let tail = head.moved_by(-d_row * trail, -d_col * trail);
        if !grid.contains(tail) {
            return Err(GameError::InvalidConfig(format!(
                "a snake of length {} facing {:?} from ({}, {}) does not fit the grid",
                self.initial_snake_length, self.spawn_direction, self.start_row, self.start_col
            )));
        }

        Ok(())
    }
}
