use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::{PlayMode, ReplayMode, parse_script};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on an odd-sized square grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the board (odd)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Number of segments the snake starts with
    #[arg(long)]
    snake_length: Option<usize>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write logs to this file (play mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directions to replay, comma separated (replay mode)
    #[arg(long, default_value = "")]
    moves: String,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Replay a list of directions and print every move
    Replay,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if matches!(cli.mode, Mode::Replay) {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(length) = cli.snake_length {
        config.snake_start_length = length;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_millis = tick_ms;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    tracing::info!(?config, "Starting");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config)?;
            play_mode.run().await?;
        }
        Mode::Replay => {
            let mut replay_mode = ReplayMode::new(config, parse_script(&cli.moves))?;
            let summary = replay_mode.run()?;
            println!(
                "{} moves, {} game overs, {} skipped",
                summary.moves, summary.game_overs, summary.skipped
            );
        }
    }

    Ok(())
}
