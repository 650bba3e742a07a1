//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The renderer and the replay mode both drive it through [`SnakeSimulation`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid_map;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{SnakeSimulation, spiral_layout};
pub use error::{ConfigError, ParseDirectionError};
pub use grid_map::GridMap;
pub use state::{
    GameOverReason, MapCoords, MoveOutcome, Position, Segment, SegmentId, SegmentMove, Snake,
};
