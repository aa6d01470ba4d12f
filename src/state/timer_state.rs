//! Pomodoro countdown state machine

/// Default pomodoro length in minutes
pub const DEFAULT_POMODORO_MINUTES: u64 = 25;

/// Current phase of the countdown.
///
/// Remaining time lives inside the phases that need it, so a running or
/// paused timer always has at least one second left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Not started, remaining equals the configured duration
    Idle,
    Running { remaining: u64 },
    Paused { remaining: u64 },
    /// Countdown reached zero
    Expired,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running { .. } => "running",
            TimerPhase::Paused { .. } => "paused",
            TimerPhase::Expired => "expired",
        }
    }
}

/// Events produced by transitions, forwarded to the notification sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Reset,
    Ended,
}

/// Timer state for a single pomodoro widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    configured_seconds: u64,
    phase: TimerPhase,
}

impl TimerState {
    /// Create an idle timer with the given duration in seconds
    pub fn new(configured_seconds: u64) -> Self {
        Self {
            configured_seconds,
            phase: TimerPhase::Idle,
        }
    }

    /// Create an idle timer from a duration in minutes
    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(minutes.saturating_mul(60))
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn configured_seconds(&self) -> u64 {
        self.configured_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        match self.phase {
            TimerPhase::Idle => self.configured_seconds,
            TimerPhase::Running { remaining } | TimerPhase::Paused { remaining } => remaining,
            TimerPhase::Expired => 0,
        }
    }

    /// Check if the countdown is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Running { .. })
    }

    /// Start or resume the countdown.
    ///
    /// An expired timer restarts from the configured duration. A zero-length
    /// timer expires immediately. Starting a running timer does nothing.
    pub fn start(&mut self) -> Option<TimerEvent> {
        let remaining = match self.phase {
            TimerPhase::Running { .. } => return None,
            TimerPhase::Paused { remaining } => remaining,
            TimerPhase::Idle | TimerPhase::Expired => self.configured_seconds,
        };

        if remaining == 0 {
            self.phase = TimerPhase::Expired;
            return Some(TimerEvent::Ended);
        }

        self.phase = TimerPhase::Running { remaining };
        Some(TimerEvent::Started)
    }

    /// Pause a running countdown
    pub fn pause(&mut self) -> Option<TimerEvent> {
        match self.phase {
            TimerPhase::Running { remaining } => {
                self.phase = TimerPhase::Paused { remaining };
                Some(TimerEvent::Paused)
            }
            _ => None,
        }
    }

    /// Start/pause button behaviour: pause when running, start otherwise
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advance the countdown by one second. Ignored unless running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        match self.phase {
            TimerPhase::Running { remaining } if remaining <= 1 => {
                self.phase = TimerPhase::Expired;
                Some(TimerEvent::Ended)
            }
            TimerPhase::Running { remaining } => {
                self.phase = TimerPhase::Running { remaining: remaining - 1 };
                None
            }
            _ => None,
        }
    }

    /// Stop and restore the configured duration
    pub fn reset(&mut self) -> TimerEvent {
        self.phase = TimerPhase::Idle;
        TimerEvent::Reset
    }

    /// Replace the configured duration; always leaves the timer idle
    pub fn set_configured_seconds(&mut self, seconds: u64) {
        self.configured_seconds = seconds;
        self.phase = TimerPhase::Idle;
    }

    /// Elapsed share of the configured duration, 0.0 to 100.0
    pub fn progress_percent(&self) -> f64 {
        if self.configured_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.configured_seconds - self.remaining_seconds();
        elapsed as f64 / self.configured_seconds as f64 * 100.0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_POMODORO_MINUTES)
    }
}

/// Parse a duration input in minutes the way a browser `parseInt` would.
///
/// Leading whitespace and an optional sign are accepted, followed by the
/// leading run of digits. Returns `None` for negative or non-numeric input.
pub fn parse_minutes(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: u64 = digits[..end].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(state: &TimerState) -> u64 {
        match state.phase() {
            TimerPhase::Running { remaining } => remaining,
            other => panic!("expected running, got {:?}", other),
        }
    }

    #[test]
    fn new_timer_is_idle_with_full_duration() {
        let timer = TimerState::default();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.configured_seconds(), 25 * 60);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn start_after_expiry_restarts_from_configured() {
        let mut timer = TimerState::new(25 * 60);
        timer.phase = TimerPhase::Expired;
        assert_eq!(timer.remaining_seconds(), 0);

        assert_eq!(timer.start(), Some(TimerEvent::Started));
        assert_eq!(running(&timer), 25 * 60);
    }

    #[test]
    fn each_tick_decrements_by_one() {
        let mut timer = TimerState::new(5);
        timer.start();
        for expected in (1..5).rev() {
            assert_eq!(timer.tick(), None);
            assert_eq!(running(&timer), expected);
        }
        assert_eq!(timer.tick(), Some(TimerEvent::Ended));
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert!(!timer.is_running());
    }

    #[test]
    fn ticks_after_expiry_are_ignored() {
        let mut timer = TimerState::new(1);
        timer.start();
        assert_eq!(timer.tick(), Some(TimerEvent::Ended));
        for _ in 0..10 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn pause_freezes_remaining_until_start() {
        let mut timer = TimerState::new(100);
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.pause(), Some(TimerEvent::Paused));
        for _ in 0..50 {
            timer.tick();
        }
        assert_eq!(timer.phase(), TimerPhase::Paused { remaining: 98 });

        assert_eq!(timer.start(), Some(TimerEvent::Started));
        assert_eq!(running(&timer), 98);
    }

    #[test]
    fn pause_and_start_are_noops_in_wrong_phase() {
        let mut timer = TimerState::new(10);
        assert_eq!(timer.pause(), None);
        timer.start();
        assert_eq!(timer.start(), None);
        assert_eq!(running(&timer), 10);
    }

    #[test]
    fn toggle_alternates_between_running_and_paused() {
        let mut timer = TimerState::new(10);
        assert_eq!(timer.toggle(), Some(TimerEvent::Started));
        timer.tick();
        assert_eq!(timer.toggle(), Some(TimerEvent::Paused));
        assert_eq!(timer.phase(), TimerPhase::Paused { remaining: 9 });
        assert_eq!(timer.toggle(), Some(TimerEvent::Started));
    }

    #[test]
    fn reset_restores_configured_and_stops() {
        let mut timer = TimerState::new(60);
        timer.start();
        timer.tick();
        assert_eq!(timer.reset(), TimerEvent::Reset);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 60);

        timer.set_configured_seconds(120);
        timer.reset();
        assert_eq!(timer.remaining_seconds(), 120);
    }

    #[test]
    fn editing_duration_stops_a_running_timer() {
        let mut timer = TimerState::new(60);
        timer.start();
        timer.tick();
        timer.set_configured_seconds(300);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 300);
    }

    #[test]
    fn zero_length_timer_expires_on_start() {
        let mut timer = TimerState::new(0);
        assert_eq!(timer.start(), Some(TimerEvent::Ended));
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.progress_percent(), 0.0);
    }

    #[test]
    fn progress_tracks_elapsed_share() {
        let mut timer = TimerState::new(100);
        assert_eq!(timer.progress_percent(), 0.0);
        timer.start();
        for _ in 0..25 {
            timer.tick();
        }
        assert_eq!(timer.progress_percent(), 25.0);
    }

    #[test]
    fn parse_minutes_follows_parse_int_rules() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("  7"), Some(7));
        assert_eq!(parse_minutes("+3"), Some(3));
        assert_eq!(parse_minutes("12abc"), Some(12));
        assert_eq!(parse_minutes("2.5"), Some(2));
        assert_eq!(parse_minutes("0"), Some(0));
        assert_eq!(parse_minutes("-0"), Some(0));
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("NaN"), None);
    }
}
