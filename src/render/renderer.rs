use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Painter, Rectangle, Shape},
    },
};

use crate::game::SnakeSimulation;
use crate::metrics::SessionMetrics;

use super::animator::SnakeAnimator;
use super::board_view::BoardView;
use super::tween::Point;

/// Side of a wireframe cell, slightly under one unit so neighbours stay apart
const CELL_SIZE: f64 = 0.9;
/// Side of a body block
const BLOCK_SIZE: f64 = 0.7;
/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u16 = 2;

/// Everything one frame needs
pub struct Scene<'a> {
    pub sim: &'a SnakeSimulation,
    pub board: &'a BoardView,
    pub animator: &'a SnakeAnimator,
    pub metrics: &'a SessionMetrics,
    pub status: Option<&'a str>,
    pub paused: bool,
    pub now: Instant,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(scene), chunks[0]);

        let board_area = square_area(chunks[1]);
        self.render_board(frame, board_area, scene);

        frame.render_widget(self.render_status(scene), chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, scene: &Scene) {
        let extent = scene.sim.bound() as f64 + 0.5;
        let title = if scene.paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .marker(Marker::Braille)
            .x_bounds([-extent, extent])
            .y_bounds([-extent, extent])
            .paint(|ctx| {
                let half = CELL_SIZE / 2.0;
                for marker in scene.board.markers() {
                    ctx.draw(&Rectangle {
                        x: marker.position.x as f64 - half,
                        y: marker.position.y as f64 - half,
                        width: CELL_SIZE,
                        height: CELL_SIZE,
                        color: marker.color,
                    });
                }
                ctx.layer();

                // Tail first so the head is drawn on top while overlapping mid-tween
                for (index, segment) in scene.sim.snake().segments.iter().enumerate().rev() {
                    let center = scene
                        .animator
                        .position(segment.id, scene.now)
                        .unwrap_or_else(|| segment.position.into());
                    let color = if index == 0 { Color::Cyan } else { Color::Green };
                    ctx.draw(&SolidBlock {
                        center,
                        size: BLOCK_SIZE,
                        color,
                    });
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, scene: &Scene) -> Paragraph<'_> {
        let config = scene.sim.config();
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        // Live length next to the configured one; they differ after a failed layout
        let length = format!("{}/{}", scene.sim.snake().len(), config.snake_start_length);

        let text = vec![Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(format!("{0}x{0}", config.grid_size), value),
            Span::raw("   "),
            Span::styled("Length: ", label),
            Span::styled(length, value),
            Span::raw("   "),
            Span::styled("Moves: ", label),
            Span::styled(scene.metrics.moves.to_string(), value),
            Span::raw("   "),
            Span::styled("Game overs: ", label),
            Span::styled(scene.metrics.game_overs.to_string(), value),
            Span::raw("   "),
            Span::styled("Restarts: ", label),
            Span::styled(scene.metrics.restarts.to_string(), value),
            Span::raw("   "),
            Span::styled("Time: ", label),
            Span::styled(scene.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_status(&self, scene: &Scene) -> Paragraph<'_> {
        let line = match scene.status {
            Some(status) => Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(""),
        };
        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" grid | "),
            Span::styled("[/]", Style::default().fg(Color::Cyan)),
            Span::raw(" length | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A filled square centered on a continuous point
struct SolidBlock {
    center: Point,
    size: f64,
    color: Color,
}

impl Shape for SolidBlock {
    fn draw(&self, painter: &mut Painter) {
        const STEPS: usize = 16;
        let half = self.size / 2.0;
        for i in 0..=STEPS {
            let x = self.center.x - half + self.size * i as f64 / STEPS as f64;
            for j in 0..=STEPS {
                let y = self.center.y - half + self.size * j as f64 / STEPS as f64;
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

/// Largest centered rect that shows a square board on screen
fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / CELL_ASPECT);
    let width = height * CELL_ASPECT;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
