//! Repeating one-second tick task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Period between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the tick callback wants the scheduler to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

/// Owned handle to a running tick task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle {
    id: u64,
    handle: JoinHandle<()>,
}

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        debug!("Cancelling tick task {}", self.id);
        self.handle.abort();
    }
}

/// Spawn a task calling `on_tick` every [`TICK_PERIOD`], first one period
/// from now, until it returns [`TickOutcome::Stop`] or the handle is dropped.
///
/// Must be called from within a tokio runtime.
pub fn spawn_ticker<F>(id: u64, mut on_tick: F) -> TickHandle
where
    F: FnMut() -> TickOutcome + Send + 'static,
{
    // First deadline is fixed at spawn time, not at the task's first poll
    let first_tick = Instant::now() + TICK_PERIOD;

    let handle = tokio::spawn(async move {
        debug!("Tick task {} started", id);
        let mut interval = interval_at(first_tick, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            interval.tick().await;
            if on_tick() == TickOutcome::Stop {
                break;
            }
        }
        debug!("Tick task {} finished", id);
    });

    TickHandle { id, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(TICK_PERIOD).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let _handle = spawn_ticker(1, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            TickOutcome::Continue
        });

        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        advance_secs(5).await;
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_outcome_ends_the_task() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = spawn_ticker(2, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 3 { TickOutcome::Stop } else { TickOutcome::Continue }
        });

        advance_secs(10).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_ticks() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = spawn_ticker(3, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            TickOutcome::Continue
        });

        advance_secs(2).await;
        drop(handle);
        advance_secs(10).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
