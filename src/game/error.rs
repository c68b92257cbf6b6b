use thiserror::Error;

/// Recoverable conditions reported by the game engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Input that does not name one of the four directions
    #[error("unrecognized direction: {0:?}")]
    InvalidDirection(String),

    /// Every cell of the grid is taken
    #[error("no empty cell left on the grid")]
    NoSpaceAvailable,

    /// Configuration that cannot produce a playable game
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },

    #[error("position ({row}, {col}) is occupied by the snake")]
    OccupiedCell { row: i32, col: i32 },
}
