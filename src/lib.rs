//! Grid Snake - snake on an odd-sized square board
//!
//! This library provides:
//! - Core simulation: occupancy grid, spiral layout, follow-the-leader moves (game module)
//! - Terminal rendering with eased segment animation (render module)
//! - Keyboard mapping (input module)
//! - Session counters (metrics module)
//! - Interactive and headless replay execution modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
