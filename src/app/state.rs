use std::{sync::Arc, time::Instant};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    app::{
        console::{BANNER, Console},
        events::{AppEvent, start_frame_task},
        half::{Half, Transition},
        scheduler::{ControlOutcome, Scheduler, SchedulerState},
    },
    cli::Cli,
    data::sun_times::SunTimeClient,
    domain::{countdown::Countdown, location::Location, phase::classify},
    ui::{
        canvas::SkyCanvas,
        surface::{PARTICLES_ASSET, ParticleConfig, Region, SkySurface},
    },
};

/// Per-place fetch bookkeeping. `attempted_on` is the location-local day of
/// the last request, successful or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSlot {
    pub in_flight: bool,
    pub attempted_on: Option<NaiveDate>,
}

/// Everything the widget owns: both halves, the scheduler, the countdown and
/// the canvas they draw on. Events are handled one at a time.
#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub halves: [Half; 2],
    pub fetches: [FetchSlot; 2],
    pub scheduler: Scheduler,
    pub countdown: Countdown,
    pub canvas: SkyCanvas,
    pub console: Console,
    pub last_frame_at: Instant,
    client: SunTimeClient,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        Self::with_locations(cli, Location::erlangen(), Location::samui())
    }

    pub fn with_locations(cli: &Cli, upper: Location, lower: Location) -> Self {
        let particles = Arc::new(ParticleConfig::bundled().unwrap_or_else(|err| {
            warn!(
                asset = PARTICLES_ASSET,
                error = %err,
                "particle config unreadable, using defaults"
            );
            ParticleConfig::default()
        }));
        let mut canvas = SkyCanvas::new(!cli.no_animation);
        let halves = [
            Half::new(Region::Upper, upper, Arc::clone(&particles), &mut canvas),
            Half::new(Region::Lower, lower, particles, &mut canvas),
        ];

        Self {
            running: true,
            halves,
            fetches: [FetchSlot::default(); 2],
            scheduler: Scheduler::default(),
            countdown: Countdown::default(),
            canvas,
            console: Console::default(),
            last_frame_at: Instant::now(),
            client: SunTimeClient::with_base_url(cli.sun_url.clone()),
        }
    }

    pub fn half(&self, region: Region) -> &Half {
        &self.halves[region.index()]
    }

    pub fn half_mut(&mut self, region: Region) -> &mut Half {
        &mut self.halves[region.index()]
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                info!("{BANNER}");
                self.console.push(BANNER);
                if !cli.no_animation {
                    start_frame_task(tx.clone(), cli.fps);
                }
                self.bootstrap(Utc::now(), tx);
            }
            AppEvent::Tick { generation } => {
                if self.scheduler.accepts(generation) {
                    self.tick(Utc::now(), tx);
                } else {
                    debug!(generation, "dropping tick from a stopped timer");
                }
            }
            AppEvent::TickFrame => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame_at);
                self.last_frame_at = now;
                self.canvas.advance(delta);
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchSucceeded {
                region,
                requested_at,
                boundaries,
            } => {
                let slot = &mut self.fetches[region.index()];
                slot.in_flight = false;
                let location = self.halves[region.index()].location_mut();
                location.replace_sun_times(boundaries, requested_at, Utc::now());
                info!(
                    city = %location.city,
                    sunrise = %boundaries.sunrise,
                    sunset = %boundaries.sunset,
                    "sun times updated"
                );
            }
            AppEvent::FetchFailed { region, error } => {
                self.fetches[region.index()].in_flight = false;
                let city = &self.halves[region.index()].location().city;
                warn!(%city, %error, "sun-time fetch failed");
                self.console.push(format!("Fetch error for {city}: {error}"));
            }
            AppEvent::Halt => self.halt(),
            AppEvent::Resume => self.resume(tx),
            AppEvent::Quit => {
                self.running = false;
            }
        }

        Ok(())
    }

    /// Startup: request sun times for every place, then start ticking.
    pub fn bootstrap(&mut self, now: DateTime<Utc>, tx: &mpsc::Sender<AppEvent>) {
        for region in Region::ALL {
            self.spawn_fetch(region, now, tx);
        }
        if let ControlOutcome::Changed(state) = self.scheduler.resume(tx) {
            info!(state = state.label(), "scheduler started");
        }
    }

    /// One scheduler tick evaluated at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>, tx: &mpsc::Sender<AppEvent>) {
        let reading = self.countdown.reading(now);
        self.canvas.show_countdown(&reading);

        for half in &self.halves {
            half.show_local_time(now, &mut self.canvas);
        }

        for half in &mut self.halves {
            let phase = classify(half.location(), now);
            match half.apply_phase(phase, now, &mut self.canvas) {
                Ok(Transition::Applied { from, to }) => {
                    info!(
                        city = %half.location().city,
                        from = from.map_or("none", |p| p.label()),
                        to = to.label(),
                        "phase changed"
                    );
                }
                Ok(Transition::Unchanged) => {}
                Err(err) => {
                    error!(city = %half.location().city, error = %err, "phase not applied");
                    self.console
                        .push(format!("{}: {err}", half.location().city));
                }
            }
        }

        for region in Region::ALL {
            if self.should_fetch(region, now) {
                self.spawn_fetch(region, now, tx);
            }
        }
    }

    /// A place is refetched once per local day: only when its boundaries are
    /// from an earlier day, nothing is in flight and no request went out today.
    pub fn should_fetch(&self, region: Region, now: DateTime<Utc>) -> bool {
        let slot = self.fetches[region.index()];
        let location = self.half(region).location();
        !slot.in_flight
            && location.needs_refresh(now)
            && slot.attempted_on != Some(location.local_date(now))
    }

    fn spawn_fetch(&mut self, region: Region, now: DateTime<Utc>, tx: &mpsc::Sender<AppEvent>) {
        let location = self.halves[region.index()].location();
        let day = location.fetch_day(now);
        let (latitude, longitude) = (location.latitude, location.longitude);
        info!(city = %location.city, date = day.as_query(), "requesting sun times");

        let slot = &mut self.fetches[region.index()];
        slot.in_flight = true;
        slot.attempted_on = Some(location.local_date(now));

        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(latitude, longitude, day).await {
                Ok(boundaries) => AppEvent::FetchSucceeded {
                    region,
                    requested_at: now,
                    boundaries,
                },
                Err(err) => AppEvent::FetchFailed {
                    region,
                    error: err.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    pub fn halt(&mut self) {
        match self.scheduler.halt() {
            ControlOutcome::Changed(state) => {
                info!(state = state.label(), "periodic updates halted");
                self.console.push("Periodic updates HALTED");
            }
            ControlOutcome::AlreadyIn(_) => self.report_redundant(SchedulerState::Halted),
        }
    }

    pub fn resume(&mut self, tx: &mpsc::Sender<AppEvent>) {
        match self.scheduler.resume(tx) {
            ControlOutcome::Changed(state) => {
                info!(state = state.label(), "periodic updates resumed");
                self.console.push("Periodic updates RUNNING");
            }
            ControlOutcome::AlreadyIn(_) => self.report_redundant(SchedulerState::Running),
        }
    }

    fn report_redundant(&mut self, state: SchedulerState) {
        let message = format!("Already {}...", state.label());
        info!("{message}");
        self.console.push(message);
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Esc | KeyCode::Char('q') => tx.send(AppEvent::Quit).await?,
                KeyCode::Char('h') => tx.send(AppEvent::Halt).await?,
                KeyCode::Char('r') => tx.send(AppEvent::Resume).await?,
                _ => {}
            }
        }
        Ok(())
    }
}
