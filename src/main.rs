// AlgoViz: step-through algorithm visualizer with a replayable event timeline

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use algoviz::config::Config;
use algoviz::errors::AppError;
use algoviz::producers::Registry;
use algoviz::session::Session;
use algoviz::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config)?;

    let registry = Registry::builtin();
    if config.list {
        for algorithm in registry.iter() {
            let meta = algorithm.meta();
            let operand = if meta.takes_operand { " <value>" } else { "" };
            println!("{:<16} {}{}", meta.id, meta.name, operand);
        }
        return Ok(());
    }

    let values = config.values()?;
    let session = Session::new(
        registry,
        &config.algorithm,
        values.as_deref(),
        config.size,
        config.rng(),
    )?;

    if config.dump {
        dump(&session, config.operand)?;
        return Ok(());
    }

    info!(algorithm = %config.algorithm, fps = config.fps, "starting terminal UI");

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session, &config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Logs go to `--log-file` when given, to stderr in dump mode, and nowhere
/// otherwise since the UI owns the terminal
fn init_tracing(config: &Config) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if config.dump {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init();
    }
    Ok(())
}

/// Print the selected algorithm's log as one JSON object per line
fn dump(session: &Session, operand: Option<f64>) -> Result<(), AppError> {
    let log = session.run(operand);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &log {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    Ok(())
}
