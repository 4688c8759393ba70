use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::event;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecaview::app::App;
use ecaview::app::Frame;
use ecaview::config::Config;
use ecaview::eca::Eca;
use ecaview::events::AppEvent;
use ecaview::io::TerminalGuard;
use ecaview::io::convert_event;
use ecaview::io::present;

/// Logs go to `path` if given, and nowhere otherwise: the terminal belongs to the viewer.
fn setup_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_logging(config.log_file.as_deref())?;

    let eca = Eca::new(
        config.rule,
        config.center.clone(),
        config.left.clone(),
        config.right.clone(),
    )?
    .with_noise(config.prob, config.seed);

    info!(rule = config.rule, prob = config.prob.get(), "Starting");

    let (cols, rows) = terminal::size().context("Failed to get the terminal size")?;
    let mut app = App::new(cols, rows, config.sensitivity, config.cadence(), Instant::now());

    let _guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
    let mut stdout = io::stdout();

    // The first cycle runs before the automaton is ready, and waits
    app.tick(Instant::now());
    app.scene_mut().attach(Box::new(eca.evolve()));

    // Handle input until the next cycle is due, then draw
    let mut poll = |timeout: Duration| -> io::Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(convert_event(event::read()?))
        } else {
            Ok(None)
        }
    };
    let mut show = |frame: Frame<'_>| present(&mut stdout, frame.image, &frame.label);

    while app.turn(&mut poll, &mut show)? {}

    info!("Exiting");

    Ok(())
}
