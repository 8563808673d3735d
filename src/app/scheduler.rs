use std::time::Duration;

use tokio::{sync::mpsc::Sender, task::JoinHandle};

use crate::app::events::{AppEvent, start_tick_task};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Halted,
}

impl SchedulerState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Halted => "HALTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Changed(SchedulerState),
    AlreadyIn(SchedulerState),
}

/// Owns the single periodic tick task. Each start bumps the generation so
/// ticks queued by a cancelled task can be told apart and dropped.
#[derive(Debug)]
pub struct Scheduler {
    state: SchedulerState,
    period: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Scheduler {
    /// Created halted; the first `resume` happens once startup fetches are out.
    pub fn new(period: Duration) -> Self {
        Self {
            state: SchedulerState::Halted,
            period,
            generation: 0,
            task: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a tick from `generation` should do any work.
    pub fn accepts(&self, generation: u64) -> bool {
        self.state == SchedulerState::Running && generation == self.generation
    }

    pub fn halt(&mut self) -> ControlOutcome {
        if self.state == SchedulerState::Halted {
            return ControlOutcome::AlreadyIn(SchedulerState::Halted);
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state = SchedulerState::Halted;
        ControlOutcome::Changed(SchedulerState::Halted)
    }

    pub fn resume(&mut self, tx: &Sender<AppEvent>) -> ControlOutcome {
        if self.state == SchedulerState::Running {
            return ControlOutcome::AlreadyIn(SchedulerState::Running);
        }
        self.generation = self.generation.wrapping_add(1);
        self.task = Some(start_tick_task(tx.clone(), self.period, self.generation));
        self.state = SchedulerState::Running;
        ControlOutcome::Changed(SchedulerState::Running)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn redundant_requests_are_reported() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::default();

        assert_eq!(
            scheduler.halt(),
            ControlOutcome::AlreadyIn(SchedulerState::Halted)
        );
        assert_eq!(
            scheduler.resume(&tx),
            ControlOutcome::Changed(SchedulerState::Running)
        );
        assert_eq!(
            scheduler.resume(&tx),
            ControlOutcome::AlreadyIn(SchedulerState::Running)
        );
        assert_eq!(
            scheduler.halt(),
            ControlOutcome::Changed(SchedulerState::Halted)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_start_after_one_full_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::default();
        scheduler.resume(&tx);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(AppEvent::Tick { generation }) => assert!(scheduler.accepts(generation)),
            other => panic!("expected tick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_is_rejected_after_restart() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::default();
        scheduler.resume(&tx);
        let first = scheduler.generation();
        scheduler.halt();
        assert!(!scheduler.accepts(first));
        scheduler.resume(&tx);
        assert!(!scheduler.accepts(first));
        assert!(scheduler.accepts(scheduler.generation()));
    }
}
