pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
#[cfg(test)]
pub(crate) mod test_support;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use app::{
    events::{AppEvent, spawn_input_task},
    state::AppState,
};
use chrono::Utc;
use cli::Cli;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::sun_times::SunTimeClient;
use domain::{countdown::Countdown, location::Location, phase::classify};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::warn;

pub async fn run(cli: Cli) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;
    }

    Ok(())
}

/// Fetches both places once and prints their clock and phase.
pub async fn run_one_shot(cli: &Cli) -> Result<()> {
    let client = SunTimeClient::with_base_url(cli.sun_url.clone());
    let now = Utc::now();

    for mut location in [Location::erlangen(), Location::samui()] {
        let day = location.fetch_day(now);
        match client.fetch(location.latitude, location.longitude, day).await {
            Ok(boundaries) => location.replace_sun_times(boundaries, now, Utc::now()),
            Err(err) => warn!(city = %location.city, error = %err, "sun-time fetch failed"),
        }
        let phase = classify(&location, now);
        let sun = location.boundaries().map_or_else(
            || "sun times unavailable".to_string(),
            |b| {
                format!(
                    "sunrise {} sunset {}",
                    location.local_clock(b.sunrise),
                    location.local_clock(b.sunset)
                )
            },
        );
        println!(
            "{:<10} {}  {:<5}  {sun}",
            location.city,
            location.local_clock(now),
            phase.label()
        );
    }

    let countdown = Countdown::default().reading(now);
    println!("{:<10} {}", "countdown", countdown.text);
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
