//! Timer state machine
//!
//! All transitions are pure and total. Scheduling of ticks lives in
//! [`crate::state::AppState`] and [`crate::tasks::ticker`].

use serde::Serialize;

use super::Mode;

/// Run status derived from the paused/stopped flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl Phase {
    /// Lowercase name used in logs and responses
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running, nothing changed
    Ignored,
    /// One second was counted down
    Counted { seconds_left: u64 },
    /// Remaining time hit zero and the timer moved on to `next`
    Expired { finished: Mode, next: Mode },
}

/// Countdown state for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub seconds_left: u64,
    pub mode: Mode,
    pub is_paused: bool,
    pub is_stopped: bool,
}

impl TimerState {
    /// Create an idle timer in focus mode
    pub fn new() -> Self {
        Self::idle(Mode::Focus)
    }

    fn idle(mode: Mode) -> Self {
        Self {
            seconds_left: mode.duration_seconds(),
            mode,
            is_paused: true,
            is_stopped: true,
        }
    }

    /// Current run status
    pub fn phase(&self) -> Phase {
        match (self.is_stopped, self.is_paused) {
            (true, _) => Phase::Idle,
            (false, true) => Phase::Paused,
            (false, false) => Phase::Running,
        }
    }

    /// Whether ticks are being counted
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Toggle between running and paused. Idle starts running.
    pub fn start_or_pause(&mut self) {
        if self.is_running() {
            self.is_paused = true;
        } else {
            self.is_stopped = false;
            self.is_paused = false;
        }
    }

    /// Stop and rewind the current mode
    pub fn give_up(&mut self) {
        *self = Self::idle(self.mode);
    }

    /// Switch to `mode` and rewind.
    ///
    /// Reselecting the active mode of a running or paused session does
    /// nothing; returns whether the state was reset.
    pub fn select_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode && !self.is_stopped {
            return false;
        }
        *self = Self::idle(mode);
        true
    }

    /// Count down one second, expiring when zero is reached
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() || self.seconds_left == 0 {
            return TickOutcome::Ignored;
        }

        self.seconds_left -= 1;
        if self.seconds_left > 0 {
            return TickOutcome::Counted { seconds_left: self.seconds_left };
        }

        let finished = self.mode;
        let next = finished.after_expiry();
        self.select_mode(next);
        TickOutcome::Expired { finished, next }
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format_time(self.seconds_left)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as "MM:SS"
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(state: &TimerState) {
        if state.is_stopped {
            assert!(state.is_paused, "stopped timer must be paused: {:?}", state);
        }
        assert!(state.seconds_left <= state.mode.duration_seconds());
    }

    fn running(mode: Mode) -> TimerState {
        let mut state = TimerState::new();
        state.select_mode(mode);
        state.start_or_pause();
        state
    }

    #[test]
    fn starts_idle_in_focus() {
        let state = TimerState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.mode, Mode::Focus);
        assert_eq!(state.seconds_left, 1500);
        assert_invariants(&state);
    }

    #[test]
    fn start_pause_toggles() {
        let mut state = TimerState::new();
        state.start_or_pause();
        assert_eq!(state.phase(), Phase::Running);
        state.start_or_pause();
        assert_eq!(state.phase(), Phase::Paused);
        state.start_or_pause();
        assert_eq!(state.phase(), Phase::Running);
        assert_invariants(&state);
    }

    #[test]
    fn full_focus_session_expires_once_into_short_break() {
        let mut state = running(Mode::Focus);
        let mut expiries = 0;

        for _ in 0..1500 {
            if let TickOutcome::Expired { finished, next } = state.tick() {
                assert_eq!(finished, Mode::Focus);
                assert_eq!(next, Mode::ShortBreak);
                expiries += 1;
            }
            assert_invariants(&state);
        }

        assert_eq!(expiries, 1);
        assert_eq!(state.mode, Mode::ShortBreak);
        assert_eq!(state.seconds_left, 300);
        assert!(state.is_stopped);
        assert!(state.is_paused);
    }

    #[test]
    fn breaks_expire_back_to_focus() {
        for mode in [Mode::ShortBreak, Mode::LongBreak] {
            let mut state = running(mode);
            state.seconds_left = 1;
            assert_eq!(
                state.tick(),
                TickOutcome::Expired { finished: mode, next: Mode::Focus }
            );
            assert_eq!(state, TimerState::new());
        }
    }

    #[test]
    fn ticks_are_inert_unless_running() {
        let mut idle = TimerState::new();
        assert_eq!(idle.tick(), TickOutcome::Ignored);
        assert_eq!(idle.seconds_left, 1500);

        let mut paused = running(Mode::Focus);
        paused.tick();
        paused.start_or_pause();
        assert_eq!(paused.tick(), TickOutcome::Ignored);
        assert_eq!(paused.seconds_left, 1499);
    }

    #[test]
    fn give_up_rewinds_from_every_phase() {
        let mut states = vec![TimerState::new(), running(Mode::LongBreak)];
        let mut paused = running(Mode::ShortBreak);
        paused.tick();
        paused.start_or_pause();
        states.push(paused);

        for mut state in states {
            let mode = state.mode;
            state.give_up();
            assert_eq!(state.phase(), Phase::Idle);
            assert_eq!(state.seconds_left, mode.duration_seconds());
            let once = state.clone();
            state.give_up();
            assert_eq!(state, once);
        }
    }

    #[test]
    fn reselecting_active_mode_is_a_no_op() {
        let mut state = running(Mode::Focus);
        state.tick();
        let before = state.clone();
        assert!(!state.select_mode(Mode::Focus));
        assert_eq!(state, before);

        state.start_or_pause();
        let before = state.clone();
        assert!(!state.select_mode(Mode::Focus));
        assert_eq!(state, before);
    }

    #[test]
    fn selecting_mode_while_idle_resets() {
        let mut state = TimerState::new();
        assert!(state.select_mode(Mode::LongBreak));
        assert_eq!(state.mode, Mode::LongBreak);
        assert_eq!(state.seconds_left, 900);
        assert_eq!(state.phase(), Phase::Idle);

        assert!(state.select_mode(Mode::LongBreak));
        assert_eq!(state.seconds_left, 900);
    }

    #[test]
    fn switching_mode_while_running_stops() {
        let mut state = running(Mode::Focus);
        state.tick();
        assert!(state.select_mode(Mode::ShortBreak));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.seconds_left, 300);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(59), "00:59");
    }
}
