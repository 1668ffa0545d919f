//! Cooking countdown.
//!
//! The timer is a pure state machine; whoever owns it drives [`Timer::tick`]
//! once per second while [`Timer::is_ticking`] is true and drops the tick
//! source as soon as it turns false.

use std::fmt;

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Set,
    Running,
    Paused,
    Expired,
}

impl TimerState {
    fn label(self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Set => "set",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Expired => "expired",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Seconds left after this tick
    Tick(u64),
    /// Reached zero; emitted once per countdown
    Expired,
}

#[derive(Debug, Clone)]
pub struct Timer {
    state: TimerState,
    remaining: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Set the countdown from user input. Anything but a positive whole
    /// number of seconds is rejected and leaves the timer untouched.
    ///
    /// A running countdown keeps running from the new time; in every other
    /// state the timer becomes `Set` and waits for [`Timer::start`].
    pub fn set_time(&mut self, input: &str) -> Result<u64, TimerError> {
        let seconds = input
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| TimerError::InvalidTime(input.to_string()))?;
        self.remaining = seconds;
        if self.state != TimerState::Running {
            self.state = TimerState::Set;
        }
        Ok(seconds)
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Set | TimerState::Paused if self.remaining > 0 => {
                self.state = TimerState::Running;
                Ok(())
            }
            state => Err(invalid_transition("start", state)),
        }
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Ok(())
            }
            state => Err(invalid_transition("pause", state)),
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = 0;
    }

    /// Advance one second. Ticks outside `Running` do nothing.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            Some(TimerEvent::Expired)
        } else {
            Some(TimerEvent::Tick(self.remaining))
        }
    }

    /// Remaining time as `M:SS`.
    #[must_use]
    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}

fn invalid_transition(action: &'static str, state: TimerState) -> TimerError {
    TimerError::InvalidTransition {
        action,
        state: state.label(),
    }
}

#[must_use]
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
