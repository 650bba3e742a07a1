//! Headless replay of a scripted list of directions
//!
//! Every emitted fact is written as one line: the per-segment moves of each
//! tick and any game over. Useful for checking layouts and collisions
//! without a terminal UI.
//!
//! ```text
//! tick 1 right: moved
//!   segment 0 (id 0): (0, 0) -> (1, 0)
//! tick 2 up: game over, hit the edge of the board (restarted)
//! ```

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, warn};

use crate::game::{Direction, GameConfig, MoveOutcome, Position, SnakeSimulation};

/// Totals for a finished replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub moves: usize,
    pub game_overs: usize,
    pub skipped: usize,
}

pub struct ReplayMode {
    sim: SnakeSimulation,
    script: Vec<String>,
}

impl ReplayMode {
    pub fn new(config: GameConfig, script: Vec<String>) -> Result<Self> {
        let sim = SnakeSimulation::new(config).context("Invalid game configuration")?;
        Ok(Self { sim, script })
    }

    pub fn run(&mut self) -> Result<ReplaySummary> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    pub fn run_to<W: Write>(&mut self, out: &mut W) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        let config = self.sim.config();
        writeln!(
            out,
            "board {0}x{0}, snake length {1}",
            config.grid_size, config.snake_start_length
        )?;
        write_layout(out, &self.sim)?;

        for (i, raw) in self.script.iter().enumerate() {
            let tick = i + 1;
            let direction: Direction = match raw.parse() {
                Ok(direction) => direction,
                Err(err) => {
                    warn!(tick, %err, "Skipping invalid direction");
                    writeln!(out, "tick {tick} {raw:?}: skipped, {err}")?;
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.sim.move_snake(direction) {
                MoveOutcome::Moved(moves) => {
                    summary.moves += 1;
                    writeln!(out, "tick {tick} {direction}: moved")?;
                    for m in moves {
                        writeln!(
                            out,
                            "  segment {} (id {}): {} -> {}",
                            m.index,
                            m.id.0,
                            fmt_pos(m.from),
                            fmt_pos(m.to)
                        )?;
                    }
                }
                MoveOutcome::GameOver { reason, restarted } => {
                    summary.game_overs += 1;
                    let suffix = if restarted { " (restarted)" } else { "" };
                    writeln!(
                        out,
                        "tick {tick} {direction}: game over, {}{suffix}",
                        reason.describe()
                    )?;
                    if restarted {
                        write_layout(out, &self.sim)?;
                    }
                }
                MoveOutcome::NoSnake => {
                    writeln!(out, "tick {tick} {direction}: no snake on the board")?;
                }
            }
        }

        info!(
            moves = summary.moves,
            game_overs = summary.game_overs,
            skipped = summary.skipped,
            "Replay finished"
        );
        Ok(summary)
    }
}

fn write_layout<W: Write>(out: &mut W, sim: &SnakeSimulation) -> Result<()> {
    if sim.snake().is_empty() {
        writeln!(out, "layout: empty")?;
        return Ok(());
    }
    let cells: Vec<String> = sim.snake().positions().map(fmt_pos).collect();
    writeln!(out, "layout: {}", cells.join(" "))?;
    Ok(())
}

fn fmt_pos(pos: Position) -> String {
    format!("({}, {})", pos.x, pos.y)
}

/// Split a comma or whitespace separated direction list
pub fn parse_script(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
