/// Entry point and game loop.

mod config;
mod domain;
mod hal;
mod sim;
mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

use config::GameConfig;
use domain::levels;
use sim::console::Console;
use sim::game::GameSession;
use ui::terminal::TerminalBoard;

/// Sleep between timer polls when no frame was due.
const POLL_SLEEP: Duration = Duration::from_millis(1);

fn main() {
    let config = GameConfig::load();
    setup_logging(&config);

    if let Err(e) = run(&config) {
        tracing::error!("{e:#}");
        eprintln!("mazememory: {e:#}");
        std::process::exit(1);
    }
}

/// The terminal belongs to the board, so logs go to a file.
fn setup_logging(config: &GameConfig) {
    let level = config.log.level.parse::<Level>().unwrap_or_else(|_| {
        eprintln!("Warning: unknown log level {:?}, using info", config.log.level);
        Level::INFO
    });
    let file = match File::create(&config.log.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open {}: {e}", config.log.file.display());
            eprintln!("Logging disabled.");
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn run(config: &GameConfig) -> Result<()> {
    let board = TerminalBoard::open(config).context("board acquisition failed")?;
    let session = GameSession::new(levels::load_all());
    tracing::info!(levels = session.level_count(), "game started");

    let mut console = Console::new(board, session);
    let result = game_loop(&mut console);

    let board = console.into_board();
    board.close()?;
    result
}

fn game_loop(console: &mut Console<TerminalBoard>) -> Result<()> {
    loop {
        console.board_mut().pump();
        if console.board().quit_requested() {
            tracing::info!(
                level = console.session().map_index + 1,
                frames = console.timer().ticks(),
                deferred = console.deferred_ticks(),
                feedback_tones = console.feedback_count(),
                "quit requested"
            );
            return Ok(());
        }

        if console.poll() {
            console.board_mut().refresh()?;
        } else {
            std::thread::sleep(POLL_SLEEP);
        }
    }
}
