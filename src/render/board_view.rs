use rand::Rng;
use ratatui::style::Color;

use crate::game::{GridMap, Position};

/// A wireframe marker for one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMarker {
    pub position: Position,
    pub color: Color,
}

/// The visual board, rebuilt whenever the simulation resets its board
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    generation: u64,
    markers: Vec<CellMarker>,
}

impl BoardView {
    pub fn markers(&self) -> &[CellMarker] {
        &self.markers
    }

    /// Rebuild the markers if `generation` differs from the one last built.
    /// Returns whether a rebuild happened.
    pub fn sync<R: Rng>(&mut self, grid: &GridMap, generation: u64, rng: &mut R) -> bool {
        if generation == self.generation && !self.markers.is_empty() {
            return false;
        }
        self.markers = grid
            .cells()
            .map(|position| CellMarker {
                position,
                color: random_color(rng),
            })
            .collect();
        self.generation = generation;
        true
    }
}

fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::Rgb(rng.r#gen(), rng.r#gen(), rng.r#gen())
}
