use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc::Sender,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval, interval_at},
};

use crate::{domain::location::SunBoundaries, ui::surface::Region};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    Tick {
        generation: u64,
    },
    TickFrame,
    Input(Event),
    FetchSucceeded {
        region: Region,
        requested_at: DateTime<Utc>,
        boundaries: SunBoundaries,
    },
    FetchFailed {
        region: Region,
        error: String,
    },
    Halt,
    Resume,
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Periodic scheduler tick. The first tick fires one full `period` after
/// start; late ticks are skipped, never bunched.
pub fn start_tick_task(tx: Sender<AppEvent>, period: Duration, generation: u64) -> JoinHandle<()> {
    let first = Instant::now() + period;
    tokio::spawn(async move {
        let mut ticker = interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::Tick { generation }).await.is_err() {
                break;
            }
        }
    })
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) {
    let fps = fps.max(5);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}
