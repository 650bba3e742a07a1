//! Occupancy grid for the square board and the transforms between centered
//! world coordinates and zero-based map indices.
//!
//! Rows grow downward (world `y` decreases) and columns grow rightward
//! (world `x` increases), so for a board with bound `b`:
//!
//! ```text
//! row = b - y      col = x + b
//! x   = col - b    y   = b - row
//! ```

use super::state::{MapCoords, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    grid_size: usize,
    bound: i32,
    cells: Vec<bool>,
}

impl GridMap {
    /// Create a `grid_size x grid_size` grid with every cell free.
    ///
    /// `grid_size` is expected to have passed
    /// [`GameConfig::validate_grid_size`](super::GameConfig::validate_grid_size).
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            bound: (grid_size / 2) as i32,
            cells: vec![false; grid_size * grid_size],
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Largest absolute world coordinate on either axis
    pub fn bound(&self) -> i32 {
        self.bound
    }

    pub fn to_map_coords(&self, pos: Position) -> MapCoords {
        MapCoords::new(self.bound - pos.y, pos.x + self.bound)
    }

    pub fn to_world_coords(&self, coords: MapCoords) -> Position {
        Position::new(coords.col - self.bound, self.bound - coords.row)
    }

    pub fn is_out_of_bounds(&self, coords: MapCoords) -> bool {
        let size = self.grid_size as i32;
        coords.row < 0 || coords.row >= size || coords.col < 0 || coords.col >= size
    }

    /// Whether a segment holds the cell.
    ///
    /// # Panics
    ///
    /// If `coords` is off the board; bounds-check with
    /// [`is_out_of_bounds`](Self::is_out_of_bounds) first.
    pub fn is_occupied(&self, coords: MapCoords) -> bool {
        self.cells[self.index(coords)]
    }

    /// # Panics
    ///
    /// If `coords` is off the board.
    pub fn set_occupied(&mut self, coords: MapCoords, value: bool) {
        let index = self.index(coords);
        self.cells[index] = value;
    }

    /// Free every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Every board cell in world coordinates, row-major
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.grid_size as i32;
        (0..size).flat_map(move |row| {
            (0..size).map(move |col| self.to_world_coords(MapCoords::new(row, col)))
        })
    }

    /// Occupied cells, row-major
    pub fn occupied_cells(&self) -> impl Iterator<Item = MapCoords> + '_ {
        let size = self.grid_size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(i, _)| MapCoords::new((i / size) as i32, (i % size) as i32))
    }

    fn index(&self, coords: MapCoords) -> usize {
        assert!(
            !self.is_out_of_bounds(coords),
            "map coords {coords:?} outside a {0}x{0} grid",
            self.grid_size
        );
        coords.row as usize * self.grid_size + coords.col as usize
    }
}
