//! Terminal view of the simulation: colored wireframe board cells, solid
//! body blocks and eased movement between cells.

pub mod animator;
pub mod board_view;
pub mod renderer;
pub mod tween;

pub use animator::SnakeAnimator;
pub use board_view::{BoardView, CellMarker};
pub use renderer::{Renderer, Scene};
pub use tween::{Point, Tween};
