//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A front end drives it by calling `advance` on a timer and `set_direction` on input.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, IgnoreReason, InputOutcome, TickResult};
pub use error::GameError;
pub use grid::{Grid, Position};
pub use state::{CollisionType, GameState, Phase, Segment, Snake};
