use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::direction::Direction;
use super::error::GameError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// True if the two cells share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Largest accepted width or height, keeps every coordinate and the area in `i32`
pub const MAX_GRID_SIDE: usize = 4096;

/// Fixed-size coordinate space the snake lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(GameError::InvalidConfig(format!(
                "grid sides are limited to {}, got {}x{}",
                MAX_GRID_SIDE, width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if a position lies within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.height
            && pos.col >= 0
            && (pos.col as usize) < self.width
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |row| (0..self.width as i32).map(move |col| Position::new(row, col)))
    }

    /// Pick a cell uniformly at random among those not in `occupied`
    pub fn random_empty_cell<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        self.cells()
            .filter(|pos| !occupied.contains(pos))
            .choose(rng)
            .ok_or(GameError::NoSpaceAvailable)
    }
}
