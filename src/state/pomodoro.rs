//! Pomodoro widget: countdown state plus its tick scheduler

use std::sync::{Arc, Mutex, Weak};
use serde::Serialize;
use tracing::{debug, error, info};

use super::timer_state::{TimerEvent, TimerState};
use crate::{
    services::Notifier,
    tasks::{spawn_ticker, TickHandle, TickOutcome},
    utils::format_clock,
};

/// Point-in-time view of the pomodoro timer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PomodoroSnapshot {
    pub phase: &'static str,
    pub configured_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
    /// Remaining time as `MM:SS`
    pub display: String,
    pub progress_percent: f64,
}

impl From<&TimerState> for PomodoroSnapshot {
    fn from(timer: &TimerState) -> Self {
        Self {
            phase: timer.phase().as_str(),
            configured_seconds: timer.configured_seconds(),
            remaining_seconds: timer.remaining_seconds(),
            running: timer.is_running(),
            display: format_clock(timer.remaining_seconds()),
            progress_percent: timer.progress_percent(),
        }
    }
}

#[derive(Debug)]
struct PomodoroSlot {
    timer: TimerState,
    /// Live tick task, present exactly while the timer is running
    ticker: Option<TickHandle>,
    next_ticker_id: u64,
}

#[derive(Debug)]
struct PomodoroInner {
    slot: Mutex<PomodoroSlot>,
    notifier: Notifier,
}

/// Shared handle to the pomodoro timer
#[derive(Debug, Clone)]
pub struct Pomodoro {
    inner: Arc<PomodoroInner>,
}

impl Pomodoro {
    /// Create an idle timer of `minutes` length
    pub fn new(minutes: u64, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(PomodoroInner {
                slot: Mutex::new(PomodoroSlot {
                    timer: TimerState::from_minutes(minutes),
                    ticker: None,
                    next_ticker_id: 1,
                }),
                notifier,
            }),
        }
    }

    pub fn snapshot(&self) -> Result<PomodoroSnapshot, String> {
        let slot = self.inner.lock_slot()?;
        Ok(PomodoroSnapshot::from(&slot.timer))
    }

    pub fn start(&self) -> Result<PomodoroSnapshot, String> {
        self.transition(TimerState::start)
    }

    pub fn pause(&self) -> Result<PomodoroSnapshot, String> {
        self.transition(TimerState::pause)
    }

    pub fn toggle(&self) -> Result<PomodoroSnapshot, String> {
        self.transition(TimerState::toggle)
    }

    pub fn reset(&self) -> Result<PomodoroSnapshot, String> {
        self.transition(|timer| Some(timer.reset()))
    }

    /// Replace the configured duration. The timer stops and goes idle.
    pub fn set_duration_minutes(&self, minutes: u64) -> Result<PomodoroSnapshot, String> {
        info!("Setting pomodoro duration to {} minutes", minutes);
        self.transition(|timer| {
            timer.set_configured_seconds(minutes.saturating_mul(60));
            None
        })
    }

    /// Cancel any pending tick; the timer state itself is kept
    pub fn shutdown(&self) {
        match self.inner.lock_slot() {
            Ok(mut slot) => {
                if slot.ticker.take().is_some() {
                    info!("Pomodoro tick task cancelled on shutdown");
                }
            }
            Err(e) => error!("{}", e),
        }
    }

    /// Apply a state change, bring the tick task in line with the new phase
    /// and report the resulting event once the lock is released.
    fn transition<F>(&self, change: F) -> Result<PomodoroSnapshot, String>
    where
        F: FnOnce(&mut TimerState) -> Option<TimerEvent>,
    {
        let mut slot = self.inner.lock_slot()?;
        let was_running = slot.timer.is_running();
        let event = change(&mut slot.timer);

        if !slot.timer.is_running() {
            slot.ticker = None;
        } else if !was_running || slot.ticker.is_none() {
            let id = slot.next_ticker_id;
            slot.next_ticker_id = id.wrapping_add(1);
            // Replacing the handle drops, and so cancels, any previous ticker
            slot.ticker = Some(self.spawn_tick_task(id));
        }

        let snapshot = PomodoroSnapshot::from(&slot.timer);
        drop(slot);

        if let Some(event) = event {
            self.inner.report(event);
        }
        Ok(snapshot)
    }

    fn spawn_tick_task(&self, id: u64) -> TickHandle {
        let weak: Weak<PomodoroInner> = Arc::downgrade(&self.inner);
        spawn_ticker(id, move || match weak.upgrade() {
            Some(inner) => inner.on_tick(id),
            None => TickOutcome::Stop,
        })
    }
}

impl PomodoroInner {
    fn lock_slot(&self) -> Result<std::sync::MutexGuard<'_, PomodoroSlot>, String> {
        self.slot.lock()
            .map_err(|e| format!("Failed to lock pomodoro state: {}", e))
    }

    fn on_tick(&self, ticker_id: u64) -> TickOutcome {
        let mut slot = match self.lock_slot() {
            Ok(slot) => slot,
            Err(e) => {
                error!("{}", e);
                return TickOutcome::Stop;
            }
        };

        // A tick from a ticker that has since been replaced or cancelled
        if slot.ticker.as_ref().map(TickHandle::id) != Some(ticker_id) {
            debug!("Ignoring stale tick from ticker {}", ticker_id);
            return TickOutcome::Stop;
        }

        let event = slot.timer.tick();
        let outcome = if slot.timer.is_running() {
            TickOutcome::Continue
        } else {
            slot.ticker = None;
            TickOutcome::Stop
        };
        drop(slot);

        if let Some(event) = event {
            self.report(event);
        }
        outcome
    }

    fn report(&self, event: TimerEvent) {
        match event {
            TimerEvent::Started => self.notifier.success("Timer Started"),
            TimerEvent::Paused => self.notifier.warning("Timer Paused"),
            TimerEvent::Reset => self.notifier.warning("Timer Reset"),
            TimerEvent::Ended => self.notifier.warning("Time ended"),
        }
    }
}
