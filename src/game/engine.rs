use tracing::{debug, info, instrument, warn};

use super::{
    action::Direction,
    config::GameConfig,
    error::ConfigError,
    grid_map::GridMap,
    state::{GameOverReason, MoveOutcome, Position, SegmentMove, Snake},
};

/// Owns the snake and the occupancy grid and advances them one cell per move
#[derive(Debug, Clone)]
pub struct SnakeSimulation {
    config: GameConfig,
    grid: GridMap,
    snake: Snake,
    board_generation: u64,
}

impl SnakeSimulation {
    /// Build the board and lay out a snake.
    ///
    /// Only an unusable grid size is an error here. A start length above the
    /// board capacity is logged and leaves the snake empty.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        GameConfig::validate_grid_size(config.grid_size)?;
        let mut sim = Self {
            grid: GridMap::new(config.grid_size),
            config,
            snake: Snake::default(),
            board_generation: 0,
        };
        sim.reset_board();
        // Capacity failures are reported by reset_snake and leave the snake empty
        let _ = sim.reset_snake();
        Ok(sim)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn bound(&self) -> i32 {
        self.grid.bound()
    }

    /// Incremented by every `reset_board`, so views know to rebuild
    pub fn board_generation(&self) -> u64 {
        self.board_generation
    }

    /// Rebuild the board for the configured grid size.
    ///
    /// The occupancy grid starts empty; the snake is left as it was and
    /// must be laid out again with [`reset_snake`](Self::reset_snake).
    pub fn reset_board(&mut self) {
        self.grid = GridMap::new(self.config.grid_size);
        self.board_generation += 1;
        info!(
            grid_size = self.config.grid_size,
            bound = self.grid.bound(),
            generation = self.board_generation,
            "Board reset"
        );
    }

    /// Lay out a fresh snake spiralling outward from the origin
    pub fn reset_snake(&mut self) -> Result<(), ConfigError> {
        self.snake.clear();
        self.grid.clear();

        let length = self.config.snake_start_length;
        let capacity = self.grid.grid_size() * self.grid.grid_size();
        if length > capacity {
            let err = ConfigError::Capacity { length, capacity };
            warn!(%err, "Snake layout rejected");
            return Err(err);
        }

        self.snake = Snake::from_positions(spiral_layout(length));
        for pos in self.snake.positions() {
            let coords = self.grid.to_map_coords(pos);
            debug_assert!(!self.grid.is_out_of_bounds(coords));
            debug_assert!(!self.grid.is_occupied(coords));
            self.grid.set_occupied(coords, true);
        }

        info!(length, "Snake reset");
        Ok(())
    }

    /// Apply new settings and run exactly the resets they require
    pub fn configure(
        &mut self,
        grid_size: usize,
        snake_start_length: usize,
    ) -> Result<(), ConfigError> {
        GameConfig::validate_grid_size(grid_size)?;
        if snake_start_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        let grid_changed = grid_size != self.config.grid_size;
        let length_changed = snake_start_length != self.config.snake_start_length;
        self.config.grid_size = grid_size;
        self.config.snake_start_length = snake_start_length;

        if grid_changed {
            self.reset_board();
        }
        if grid_changed || length_changed {
            self.reset_snake()?;
        }
        Ok(())
    }

    /// Advance the whole snake one cell toward `direction`.
    ///
    /// Bounds and self-collision are checked for the head before anything is
    /// committed, so a game over never leaves a partially shifted body.
    #[instrument(level = "trace", skip(self))]
    pub fn move_snake(&mut self, direction: Direction) -> MoveOutcome {
        let Some(head) = self.snake.head() else {
            debug!(%direction, "Move ignored, no snake");
            return MoveOutcome::NoSnake;
        };

        let candidate = head.moved_in_direction(direction);
        let coords = self.grid.to_map_coords(candidate);
        // Bounds first: reading occupancy off the board is invalid
        let reason = if self.grid.is_out_of_bounds(coords) {
            Some(GameOverReason::OutOfBounds)
        } else if self.grid.is_occupied(coords) {
            Some(GameOverReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = reason {
            return self.game_over(reason, candidate);
        }

        self.grid.set_occupied(coords, true);

        let last = self.snake.len() - 1;
        let mut moves = Vec::with_capacity(self.snake.len());
        let mut next = candidate;
        for (index, segment) in self.snake.segments.iter_mut().enumerate() {
            let vacated = segment.position;
            if index == last {
                let tail = self.grid.to_map_coords(vacated);
                self.grid.set_occupied(tail, false);
            }
            segment.position = next;
            moves.push(SegmentMove {
                index,
                id: segment.id,
                from: vacated,
                to: next,
            });
            next = vacated;
        }

        debug!(%direction, x = candidate.x, y = candidate.y, "Snake moved");
        MoveOutcome::Moved(moves)
    }

    fn game_over(&mut self, reason: GameOverReason, candidate: Position) -> MoveOutcome {
        info!(
            ?reason,
            x = candidate.x,
            y = candidate.y,
            "Game over"
        );
        let restarted = self.config.restart_on_game_over && self.reset_snake().is_ok();
        MoveOutcome::GameOver { reason, restarted }
    }
}

/// Positions of an outward square spiral from the origin, head first.
///
/// The walk starts left and turns `left -> up -> right -> down`, with leg
/// lengths `1, 1, 2, 2, 3, 3, ...`. On an odd board it visits every cell
/// exactly once before leaving it, so any `length <= grid_size^2` stays on
/// the board without overlap.
pub fn spiral_layout(length: usize) -> Vec<Position> {
    let mut positions = Vec::with_capacity(length);
    if length == 0 {
        return positions;
    }

    let mut pos = Position::ORIGIN;
    let mut direction = Direction::Left;
    let mut leg = 1;
    positions.push(pos);

    while positions.len() < length {
        for _ in 0..2 {
            for _ in 0..leg {
                if positions.len() == length {
                    return positions;
                }
                pos = pos.moved_in_direction(direction);
                positions.push(pos);
            }
            direction = direction.next_in_cycle();
        }
        leg += 1;
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GRID_SIZE_LIMIT;
    use crate::game::state::{MapCoords, SegmentId};
    use std::collections::HashSet;

    fn sim(grid_size: usize, length: usize) -> SnakeSimulation {
        SnakeSimulation::new(GameConfig::new(grid_size, length)).unwrap()
    }

    fn assert_occupancy_matches(sim: &SnakeSimulation) {
        let mut expected: Vec<MapCoords> = sim
            .snake()
            .positions()
            .map(|p| sim.grid().to_map_coords(p))
            .collect();
        expected.sort_by_key(|c| (c.row, c.col));
        let occupied: Vec<MapCoords> = sim.grid().occupied_cells().collect();
        assert_eq!(occupied, expected);
    }

    #[test]
    fn test_spiral_prefix() {
        assert_eq!(
            spiral_layout(6),
            vec![
                Position::new(0, 0),
                Position::new(-1, 0),
                Position::new(-1, 1),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_spiral_fills_odd_boards() {
        for size in [1usize, 3, 5, 7, 11] {
            let bound = (size / 2) as i32;
            let cells = spiral_layout(size * size);
            let unique: HashSet<_> = cells.iter().copied().collect();
            assert_eq!(unique.len(), size * size);
            assert!(cells
                .iter()
                .all(|p| p.x.abs() <= bound && p.y.abs() <= bound));
        }
    }

    #[test]
    fn test_spiral_is_continuous() {
        let cells = spiral_layout(49);
        for pair in cells.windows(2) {
            let dist = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(dist, 1);
        }
    }

    #[test]
    fn test_new_lays_out_snake() {
        let sim = sim(5, 3);
        assert_eq!(sim.snake().len(), 3);
        assert_eq!(sim.snake().head(), Some(Position::ORIGIN));
        assert_eq!(sim.board_generation(), 1);
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_new_rejects_even_grid() {
        assert_eq!(
            SnakeSimulation::new(GameConfig::new(4, 1)).unwrap_err(),
            ConfigError::EvenGridSize(4)
        );
    }

    #[test]
    fn test_single_segment_moves_right() {
        let mut sim = sim(5, 1);
        let outcome = sim.move_snake(Direction::Right);

        assert_eq!(
            outcome,
            MoveOutcome::Moved(vec![SegmentMove {
                index: 0,
                id: SegmentId(0),
                from: Position::new(0, 0),
                to: Position::new(1, 0),
            }])
        );
        assert!(sim.grid().is_occupied(MapCoords::new(2, 3)));
        assert!(!sim.grid().is_occupied(MapCoords::new(2, 2)));
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_follow_the_leader() {
        let mut sim = sim(5, 3);
        // (0,0) (-1,0) (-1,1)
        let outcome = sim.move_snake(Direction::Down);
        let MoveOutcome::Moved(moves) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };

        let to: Vec<_> = moves.iter().map(|m| m.to).collect();
        assert_eq!(
            to,
            vec![Position::new(0, -1), Position::new(0, 0), Position::new(-1, 0)]
        );
        assert_eq!(moves[2].from, Position::new(-1, 1));
        assert!(!sim.grid().is_occupied(sim.grid().to_map_coords(Position::new(-1, 1))));
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_out_of_bounds_restarts() {
        let mut sim = sim(5, 1);
        sim.move_snake(Direction::Up);
        sim.move_snake(Direction::Up);
        let outcome = sim.move_snake(Direction::Up);

        assert_eq!(
            outcome,
            MoveOutcome::GameOver {
                reason: GameOverReason::OutOfBounds,
                restarted: true
            }
        );
        assert_eq!(sim.snake().head(), Some(Position::ORIGIN));
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_reversing_into_neck_collides() {
        let mut sim = sim(5, 3);
        // Head (0,0), neck (-1,0)
        let outcome = sim.move_snake(Direction::Left);
        assert_eq!(
            outcome,
            MoveOutcome::GameOver {
                reason: GameOverReason::SelfCollision,
                restarted: true
            }
        );
    }

    #[test]
    fn test_entering_tail_cell_collides() {
        let mut config = GameConfig::new(5, 4);
        config.restart_on_game_over = false;
        let mut sim = SnakeSimulation::new(config).unwrap();
        // (0,0) (-1,0) (-1,1) (0,1): up enters the tail cell
        assert_eq!(sim.snake().segments[3].position, Position::new(0, 1));
        let before = sim.snake().clone();
        let grid_before = sim.grid().clone();

        let outcome = sim.move_snake(Direction::Up);

        assert_eq!(
            outcome,
            MoveOutcome::GameOver {
                reason: GameOverReason::SelfCollision,
                restarted: false
            }
        );
        assert_eq!(sim.snake(), &before);
        assert_eq!(sim.grid(), &grid_before);
    }

    #[test]
    fn test_game_over_without_restart_keeps_state() {
        let mut config = GameConfig::new(5, 3);
        config.restart_on_game_over = false;
        let mut sim = SnakeSimulation::new(config).unwrap();
        sim.move_snake(Direction::Right);
        let before = sim.snake().clone();
        let grid_before = sim.grid().clone();

        let outcome = sim.move_snake(Direction::Left);

        assert_eq!(
            outcome,
            MoveOutcome::GameOver {
                reason: GameOverReason::SelfCollision,
                restarted: false
            }
        );
        assert_eq!(sim.snake(), &before);
        assert_eq!(sim.grid(), &grid_before);
    }

    #[test]
    fn test_capacity_guard() {
        let mut sim = sim(5, 26);
        assert!(sim.snake().is_empty());
        assert_eq!(sim.grid().occupied_cells().count(), 0);
        assert_eq!(
            sim.reset_snake(),
            Err(ConfigError::Capacity {
                length: 26,
                capacity: 25
            })
        );
        assert_eq!(sim.move_snake(Direction::Up), MoveOutcome::NoSnake);
    }

    #[test]
    fn test_reset_board_keeps_snake() {
        let mut sim = sim(5, 3);
        let snake = sim.snake().clone();
        sim.reset_board();
        assert_eq!(sim.snake(), &snake);
        assert_eq!(sim.grid().occupied_cells().count(), 0);
        assert_eq!(sim.board_generation(), 2);
    }

    #[test]
    fn test_configure_grid_change() {
        let mut sim = sim(5, 3);
        sim.configure(7, 3).unwrap();
        assert_eq!(sim.bound(), 3);
        assert_eq!(sim.board_generation(), 2);
        assert_eq!(sim.snake().len(), 3);
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_configure_length_change_keeps_board() {
        let mut sim = sim(5, 3);
        sim.move_snake(Direction::Down);
        sim.configure(5, 8).unwrap();
        assert_eq!(sim.board_generation(), 1);
        assert_eq!(sim.snake().len(), 8);
        assert_eq!(sim.snake().head(), Some(Position::ORIGIN));
        assert_occupancy_matches(&sim);
    }

    #[test]
    fn test_huge_grid_is_rejected() {
        assert_eq!(
            SnakeSimulation::new(GameConfig::new(usize::MAX, 1)).unwrap_err(),
            ConfigError::GridTooLarge {
                size: usize::MAX,
                limit: GRID_SIZE_LIMIT
            }
        );

        let mut sim = sim(5, 3);
        assert_eq!(
            sim.configure(usize::MAX, 3),
            Err(ConfigError::GridTooLarge {
                size: usize::MAX,
                limit: GRID_SIZE_LIMIT
            })
        );
        assert_eq!(sim.config().grid_size, 5);
        assert_eq!(sim.snake().len(), 3);
    }

    #[test]
    fn test_configure_rejects_even_grid_without_change() {
        let mut sim = sim(5, 3);
        let before = sim.snake().clone();
        assert_eq!(sim.configure(6, 3), Err(ConfigError::EvenGridSize(6)));
        assert_eq!(sim.config().grid_size, 5);
        assert_eq!(sim.snake(), &before);
        assert_eq!(sim.configure(5, 0), Err(ConfigError::ZeroLength));
        assert_eq!(sim.config().snake_start_length, 3);
    }

    #[test]
    fn test_configure_over_capacity_leaves_snake_empty() {
        let mut sim = sim(7, 30);
        assert_eq!(sim.snake().len(), 30);
        assert_eq!(
            sim.configure(5, 30),
            Err(ConfigError::Capacity {
                length: 30,
                capacity: 25
            })
        );
        assert!(sim.snake().is_empty());
        assert_eq!(sim.config().grid_size, 5);

        sim.configure(5, 25).unwrap();
        assert_eq!(sim.snake().len(), 25);
    }
}
