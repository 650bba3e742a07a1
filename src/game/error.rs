use std::fmt::{self, Display, Formatter};

/// Reasons a configuration cannot be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The board needs at least one cell
    ZeroGridSize,
    /// The board is larger than the simulation supports
    GridTooLarge { size: usize, limit: usize },
    /// The board must be symmetric around the origin
    EvenGridSize(usize),
    /// The snake needs at least one segment
    ZeroLength,
    /// More segments requested than the board has cells
    Capacity { length: usize, capacity: usize },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroGridSize => write!(f, "grid size must be positive"),
            ConfigError::GridTooLarge { size, limit } => {
                write!(f, "grid size {size} exceeds the limit of {limit}")
            }
            ConfigError::EvenGridSize(size) => write!(f, "grid size must be odd, got {size}"),
            ConfigError::ZeroLength => write!(f, "snake start length must be at least 1"),
            ConfigError::Capacity { length, capacity } => write!(
                f,
                "snake start length {length} exceeds board capacity {capacity}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A direction string other than `up`, `down`, `left` or `right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl Display for ParseDirectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid direction {:?}, expected up, down, left or right",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}
