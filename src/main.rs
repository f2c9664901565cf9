//! TETRS - A Rusty Tetris
//!
//! Proving Rust superiority one block at a time.

use crossterm::{
    event, execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::Duration,
};
use tetrs_core::{
    Clock, Control, Session, StateManager,
    input,
    render::{RenderSink, TitleSink},
    score::Score,
    settings::Settings,
    ui::TerminalUi,
};
use tracing_subscriber::EnvFilter;

/// Get the tetrs temp directory, creating it if needed
fn tetrs_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let tetrs_dir = tetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Settings first, the log filter may come from them
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&tetrs_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS starting up, session={:08x}, log={}",
        session_id,
        tetrs_dir.join(&log_file).display()
    );
    if let Some(e) = settings_error {
        tracing::warn!("{}, using defaults", e);
    }

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let mut ui = TerminalUi::new(terminal, settings.visual.clone());

    // Run app and capture result
    let result = run_app(&mut ui, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, SetTitle(""))?;

    match &result {
        Ok(score) => {
            tracing::info!("TETRS shutting down, final score {}", score.points);
            println!("\n🦀 Thanks for playing TETRS! 🦀");
            println!("Final Score: {}", score.points);
            println!("Level: {} | Lines: {}", score.level, score.lines);
        }
        Err(e) => tracing::error!("Terminal error: {}", e),
    }

    result.map(|_| ())
}

/// Frame loop: input, update, title, render, sleep
fn run_app<B: Backend + io::Write>(
    ui: &mut TerminalUi<B>,
    settings: &Settings,
) -> io::Result<Score> {
    let frame_duration = settings.display.frame_duration();
    let mut session = Session::new(Clock::wall());
    let mut manager = StateManager::new(&mut session);

    loop {
        // Drain every pending event before updating
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            let Some(input) = input::translate(&event) else {
                continue;
            };
            if manager.handle_event(input, &mut session) == Control::Exit {
                return Ok(session.score().clone());
            }
        }

        if manager.update(&mut session) == Control::Exit {
            return Ok(session.score().clone());
        }

        if let Some(title) = session.take_title() {
            ui.set_title(&title)?;
        }
        ui.render(&manager.render(&session))?;

        session.clock_mut().tick(frame_duration);
    }
}
