use super::action::Direction;

/// A cell in centered world coordinates, `y` pointing up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Zero-based row/column into the occupancy grid.
///
/// Signed so that a candidate one step off the board is still representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapCoords {
    pub row: i32,
    pub col: i32,
}

impl MapCoords {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Stable identity of a segment, assigned when the snake is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub usize);

/// One unit of the snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub position: Position,
}

/// The snake, head at index 0
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    pub segments: Vec<Segment>,
}

impl Snake {
    /// Build a snake from positions, head first, ids following the order
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| Segment {
                id: SegmentId(i),
                position,
            })
            .collect();
        Self { segments }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.segments.first().map(|s| s.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Empty after a failed layout
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// One segment's move during a tick, consumed by the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMove {
    pub index: usize,
    pub id: SegmentId,
    pub from: Position,
    pub to: Position,
}

/// Why a move ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The head would leave the board
    OutOfBounds,
    /// The head would enter a cell held by the body
    SelfCollision,
}

impl GameOverReason {
    pub fn describe(&self) -> &'static str {
        match self {
            GameOverReason::OutOfBounds => "hit the edge of the board",
            GameOverReason::SelfCollision => "ran into itself",
        }
    }
}

/// Result of a single `move_snake` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The whole body shifted by one cell
    Moved(Vec<SegmentMove>),
    /// The move was rejected before anything was committed
    GameOver {
        reason: GameOverReason,
        /// A fresh snake was laid out as part of this call
        restarted: bool,
    },
    /// There is no snake to move (the last layout failed)
    NoSnake,
}
