use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::config::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::game::{ConfigError, Direction, GameConfig, MoveOutcome, SnakeSimulation};
use crate::input::{InputHandler, KeyAction, SettingChange};
use crate::metrics::SessionMetrics;
use crate::render::{BoardView, Renderer, Scene, SnakeAnimator};

/// Interactive play in the terminal
pub struct PlayMode {
    sim: SnakeSimulation,
    board: BoardView,
    animator: SnakeAnimator,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    rng: ThreadRng,
    should_quit: bool,
    paused: bool,
    pending_direction: Option<Direction>,
    heading: Option<Direction>,
    status: Option<String>,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let animation = Duration::from_millis(config.animation_millis);
        let sim = SnakeSimulation::new(config).context("Invalid game configuration")?;

        let mut mode = Self {
            sim,
            board: BoardView::default(),
            animator: SnakeAnimator::new(animation),
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            rng: rand::thread_rng(),
            should_quit: false,
            paused: false,
            pending_direction: None,
            heading: None,
            status: None,
        };
        if let Err(err) = mode.sim.config().validate() {
            mode.status = Some(err.to_string());
        }
        mode.sync_view();
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.sim.config().tick_millis.max(1));
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let scene = Scene {
                        sim: &self.sim,
                        board: &self.board,
                        animator: &self.animator,
                        metrics: &self.metrics,
                        status: self.status.as_deref(),
                        paused: self.paused,
                        now: Instant::now(),
                    };
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &scene);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Move(dir) => {
                self.pending_direction = Some(dir);
            }
            KeyAction::Setting(change) => {
                self.change_setting(change);
            }
            KeyAction::TogglePause => {
                self.paused = !self.paused;
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// One logical move in the queued direction, or the current heading
    fn update_game(&mut self) {
        let Some(direction) = self.pending_direction.take().or(self.heading) else {
            return;
        };

        match self.sim.move_snake(direction) {
            MoveOutcome::Moved(moves) => {
                self.heading = Some(direction);
                self.animator.apply_moves(&moves, Instant::now());
                self.metrics.on_move();
            }
            MoveOutcome::GameOver { reason, restarted } => {
                self.metrics.on_game_over(restarted);
                self.heading = None;
                self.status = Some(if restarted {
                    format!("Game over: {}, restarted", reason.describe())
                } else {
                    format!("Game over: {}", reason.describe())
                });
                if restarted {
                    self.animator.snap_to(self.sim.snake(), Instant::now());
                }
            }
            MoveOutcome::NoSnake => {
                self.heading = None;
            }
        }
    }

    fn change_setting(&mut self, change: SettingChange) {
        let config = self.sim.config();
        let (mut grid_size, mut length) = (config.grid_size, config.snake_start_length);
        match change {
            SettingChange::GrowBoard => grid_size = (grid_size + 2).min(MAX_GRID_SIZE),
            SettingChange::ShrinkBoard => {
                grid_size = grid_size.saturating_sub(2).max(MIN_GRID_SIZE)
            }
            SettingChange::LongerSnake => length += 1,
            SettingChange::ShorterSnake => length = length.saturating_sub(1).max(1),
        }

        info!(grid_size, length, "Settings changed");
        let result = self.sim.configure(grid_size, length);
        self.after_reset(result);
    }

    fn reset_game(&mut self) {
        let result = self.sim.reset_snake();
        self.after_reset(result);
    }

    fn after_reset(&mut self, result: Result<(), ConfigError>) {
        self.status = match result {
            Ok(()) => None,
            Err(err) => {
                warn!(%err, "Configuration not applied");
                Some(err.to_string())
            }
        };
        self.pending_direction = None;
        self.heading = None;
        self.metrics.on_new_snake();
        self.sync_view();
    }

    fn sync_view(&mut self) {
        self.board
            .sync(self.sim.grid(), self.sim.board_generation(), &mut self.rng);
        self.animator.snap_to(self.sim.snake(), Instant::now());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.sim.snake().len(), 3);
        assert_eq!(mode.board.markers().len(), 25);
        assert!(mode.status.is_none());
    }

    #[test]
    fn test_even_grid_is_rejected() {
        assert!(PlayMode::new(GameConfig::new(4, 1)).is_err());
    }

    #[test]
    fn test_idle_until_first_direction() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.update_game();
        assert_eq!(mode.sim.snake().head(), Some(Position::ORIGIN));
        assert_eq!(mode.metrics.moves, 0);
    }

    #[test]
    fn test_keeps_heading() {
        let mut mode = PlayMode::new(GameConfig::new(7, 1)).unwrap();
        mode.apply_action(KeyAction::Move(Direction::Down));
        mode.update_game();
        mode.update_game();
        assert_eq!(mode.sim.snake().head(), Some(Position::new(0, -2)));
        assert_eq!(mode.metrics.moves, 2);
    }

    #[test]
    fn test_game_over_restarts() {
        let mut mode = PlayMode::new(GameConfig::new(5, 1)).unwrap();
        mode.apply_action(KeyAction::Move(Direction::Right));
        for _ in 0..3 {
            mode.update_game();
        }
        assert_eq!(mode.sim.snake().head(), Some(Position::ORIGIN));
        assert_eq!(mode.metrics.restarts, 1);
        assert_eq!(mode.metrics.game_overs, 1);
        assert_eq!(
            mode.status.as_deref(),
            Some("Game over: hit the edge of the board, restarted")
        );
        assert!(mode.heading.is_none());
    }

    #[test]
    fn test_game_over_without_restart_is_not_counted_as_restart() {
        let config = GameConfig {
            restart_on_game_over: false,
            ..GameConfig::new(5, 1)
        };
        let mut mode = PlayMode::new(config).unwrap();
        mode.apply_action(KeyAction::Move(Direction::Right));
        for _ in 0..3 {
            mode.update_game();
        }
        assert_eq!(mode.sim.snake().head(), Some(Position::new(2, 0)));
        assert_eq!(mode.metrics.game_overs, 1);
        assert_eq!(mode.metrics.restarts, 0);
        assert_eq!(mode.metrics.moves, 2);
        assert_eq!(
            mode.status.as_deref(),
            Some("Game over: hit the edge of the board")
        );
    }

    #[test]
    fn test_settings_panel() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.apply_action(KeyAction::Setting(SettingChange::GrowBoard));
        assert_eq!(mode.sim.config().grid_size, 7);
        assert_eq!(mode.board.markers().len(), 49);

        mode.apply_action(KeyAction::Setting(SettingChange::ShrinkBoard));
        mode.apply_action(KeyAction::Setting(SettingChange::ShrinkBoard));
        assert_eq!(mode.sim.config().grid_size, MIN_GRID_SIZE);

        mode.apply_action(KeyAction::Setting(SettingChange::LongerSnake));
        assert_eq!(mode.sim.snake().len(), 4);

        for _ in 0..10 {
            mode.apply_action(KeyAction::Setting(SettingChange::ShorterSnake));
        }
        assert_eq!(mode.sim.snake().len(), 1);
    }

    #[test]
    fn test_capacity_error_is_reported() {
        let mut mode = PlayMode::new(GameConfig::new(5, 25)).unwrap();
        mode.apply_action(KeyAction::Setting(SettingChange::LongerSnake));
        assert!(mode.sim.snake().is_empty());
        assert_eq!(
            mode.status.as_deref(),
            Some("snake start length 26 exceeds board capacity 25")
        );

        mode.apply_action(KeyAction::Setting(SettingChange::ShorterSnake));
        assert_eq!(mode.sim.snake().len(), 25);
        assert!(mode.status.is_none());
    }

    #[test]
    fn test_pause_and_quit() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.apply_action(KeyAction::TogglePause);
        assert!(mode.paused);
        mode.apply_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
