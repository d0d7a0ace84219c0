use std::{fs::OpenOptions, io, sync::Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use studydesk::config::{Cli, Config};
use studydesk::{input, ui, App, Store};

fn main() -> Result<()> {
    let config = Config::from(Cli::parse());
    init_logging(&config)?;

    // The only load of the process; handlers save after every change.
    let store = Store::new(config.data_file.clone());
    let loaded = store.load();
    let mut app = App::from_load(store, loaded, Local::now().date_naive());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "event loop failed");
    }
    info!("exit");
    result.context("terminal event loop failed")
}

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        if app.dirty {
            terminal.draw(|f| ui::render(f, app))?;
            app.dirty = false;
        }
        if app.should_quit {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) => input::handle_key(app, key),
            Event::Mouse(mouse) => input::handle_mouse(app, mouse),
            Event::Resize(..) => app.mark_dirty(),
            _ => {}
        }
    }
}
