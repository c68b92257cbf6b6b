//! Tile Snake - a grid snake game
//!
//! This library provides:
//! - Core game logic (game module), free of any terminal dependency
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
