//! Strictly Hanoi - terminal puzzle
//!
//! Drag blocks between spikes with the mouse; a block may only rest on a
//! wider one.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use strictly_hanoi::{Level, LevelConfig};
use strictly_hanoi_tui::{App, Cli, Command, Scale, draw, map_event};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            level,
            pieces,
            tick_ms,
            scale_x,
            scale_y,
        } => run_play(level, pieces, tick_ms, Scale::new(scale_x, scale_y)).await,
        Command::Check { file } => run_check(file),
    }
}

/// Picks the level to play from the command-line options.
fn load_level(level: Option<PathBuf>, pieces: Option<u16>) -> Result<LevelConfig> {
    match (level, pieces) {
        (Some(path), _) => LevelConfig::from_file(&path)
            .with_context(|| format!("Failed to load level {}", path.display())),
        (None, Some(n)) => Ok(LevelConfig::tower(usize::from(n))),
        (None, None) => Ok(LevelConfig::classic()),
    }
}

/// Validates a level file and prints a summary.
fn run_check(file: PathBuf) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let level = Level::from_file(&file).with_context(|| format!("{} is not playable", file.display()))?;
    let config = level.config();

    println!(
        "{}: {} pegs, {} pieces, win on {}, surface {}x{}",
        level.name(),
        level.pegs().len(),
        level.pieces().len(),
        level.win_peg(),
        config.width(),
        config.height()
    );
    Ok(())
}

/// Runs the terminal game.
async fn run_play(level: Option<PathBuf>, pieces: Option<u16>, tick_ms: u64, scale: Scale) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("strictly_hanoi.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_hanoi=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting Strictly Hanoi TUI");

    let config = load_level(level, pieces)?;
    let app = App::new(&config, scale)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, Duration::from_millis(tick_ms.max(1)));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Event loop: repaint when dirty, then wait up to one tick for input.
#[instrument(skip_all, fields(level = %app.board().level().name()))]
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App, tick: Duration) -> Result<()> {
    loop {
        app.drain_events();
        if app.needs_redraw() {
            terminal.draw(|frame| draw(frame, &mut app))?;
        }

        if event::poll(tick)? {
            let event = event::read()?;
            if let Some(action) = map_event(&event, app.mapper()) {
                app.apply(action);
            }
        }

        if app.should_quit() {
            info!(moves = app.board().level().stats().moves(), "Leaving game");
            return Ok(());
        }
    }
}
