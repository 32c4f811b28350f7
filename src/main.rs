mod app;
mod console;
mod definitions;
mod event;
mod logging;
mod tui;
mod ui;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use app::App;
use console::{ConsoleSettings, SettingsSource, UuidIds};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind};
use event::Event;
use futures_util::StreamExt;
use log::{info, warn};
use tui::Tui;

const CONFIG_ENV: &str = "DEXTER_CONFIG";
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    let workspace = env::current_dir().context("Failed to resolve working directory")?;
    let (settings, source) = load_settings(&workspace)?;

    match logging::init(&settings.log, &workspace) {
        Ok(Some(path)) => info!("Logging to {}", path.display()),
        Ok(None) => info!("Logging configured from config/log4rs.yaml"),
        Err(err) => eprintln!("dexter: logging disabled: {err:#}"),
    }
    match &source {
        SettingsSource::File(path) => info!("Loaded console settings from {}", path.display()),
        SettingsSource::Defaults => info!("No console settings found, using built-in seeds"),
    }

    let mut app = App::new(workspace, &settings, Box::new(UuidIds));
    info!("Dexter console started in {}", app.workspace_root.display());

    let mut terminal = tui::init().context("Failed to initialize terminal")?;
    let outcome = run(&mut terminal, &mut app).await;
    tui::restore().context("Failed to restore terminal")?;

    if let Err(err) = &outcome {
        warn!("Event loop stopped with error: {err:#}");
    }
    info!("Dexter console exiting");
    outcome
}

fn load_settings(workspace: &std::path::Path) -> Result<(ConsoleSettings, SettingsSource)> {
    let explicit = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok().filter(|value| !value.trim().is_empty()))
        .map(PathBuf::from);
    match explicit {
        Some(path) => {
            let settings = ConsoleSettings::load_file(&path)?;
            Ok((settings, SettingsSource::File(path)))
        }
        None => ConsoleSettings::load(workspace),
    }
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(TICK_RATE);

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .context("Failed to draw frame")?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => break,
                }
            }
        };

        match event {
            Event::Key(key) => app.handle_key(key),
            Event::Resize | Event::Tick => {}
        }
    }

    Ok(())
}
