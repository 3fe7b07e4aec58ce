//! Timer state machine.
//!
//! Two persisted states, `PAUSED` and `RUNNING`. Remaining time is banked
//! only when leaving `RUNNING`; while running, the live value is derived
//! from `started_at`. Every transition here is a pure function from one
//! consistent `(status, started_at, banked_seconds)` triple to another.

use crate::core::remaining::elapsed_seconds;
use crate::errors::{AppError, AppResult};
use crate::models::status::TimerStatus;
use crate::models::timer::Timer;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Reset,
    AddTime(i64),
}

impl Action {
    /// Parse the update request `{action, minutes?}`.
    pub fn from_request(action: &str, minutes: Option<i64>) -> AppResult<Self> {
        match (action.trim().to_lowercase().as_str(), minutes) {
            ("start", None) => Ok(Action::Start),
            ("pause", None) => Ok(Action::Pause),
            ("reset", None) => Ok(Action::Reset),
            ("add_time" | "add-time", Some(m)) => Ok(Action::AddTime(m)),
            ("add_time" | "add-time", None) => Err(AppError::validation(
                "minutes",
                "required when action is add_time",
            )),
            ("start" | "pause" | "reset", Some(_)) => Err(AppError::validation(
                "minutes",
                "only allowed when action is add_time",
            )),
            (other, _) => Err(AppError::validation(
                "action",
                format!("unknown action '{other}' (expected start, pause, reset or add_time)"),
            )),
        }
    }

    /// Operation name used in the audit log.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::AddTime(_) => "add_time",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddTime(m) => write!(f, "add_time(+{m}m)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Outcome of applying an action to a timer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Changed(Timer),
    /// Idempotent repeat (start on running, pause on paused).
    Unchanged,
}

pub fn apply(timer: &Timer, action: Action, now: DateTime<Utc>) -> AppResult<Transition> {
    match action {
        Action::Start => Ok(start(timer, now)),
        Action::Pause => Ok(pause(timer, now)),
        Action::Reset => Ok(reset(timer)),
        Action::AddTime(m) => add_time(timer, m),
    }
}

pub fn start(timer: &Timer, now: DateTime<Utc>) -> Transition {
    if timer.status.is_running() {
        return Transition::Unchanged;
    }

    Transition::Changed(Timer {
        status: TimerStatus::Running,
        started_at: Some(now),
        ..timer.clone()
    })
}

pub fn pause(timer: &Timer, now: DateTime<Utc>) -> Transition {
    if !timer.status.is_running() {
        return Transition::Unchanged;
    }

    let elapsed = elapsed_seconds(timer, now);

    Transition::Changed(Timer {
        status: TimerStatus::Paused,
        started_at: None,
        banked_seconds: (timer.banked_seconds - elapsed).max(0),
        ..timer.clone()
    })
}

/// Back to the full package, paused. Discards any running interval.
pub fn reset(timer: &Timer) -> Transition {
    let fresh = Timer {
        status: TimerStatus::Paused,
        started_at: None,
        banked_seconds: timer.allocated_seconds(),
        ..timer.clone()
    };

    if fresh == *timer {
        return Transition::Unchanged;
    }
    Transition::Changed(fresh)
}

/// Raise the ceiling by `minutes`. `status` and `started_at` are untouched,
/// so the raw remaining value rises by exactly `minutes * 60`, overrun or not.
pub fn add_time(timer: &Timer, minutes: i64) -> AppResult<Transition> {
    if minutes < 0 {
        return Err(AppError::StateConflict(format!(
            "cannot remove time from timer #{} ({minutes} minutes)",
            timer.id
        )));
    }
    if minutes == 0 {
        return Err(AppError::validation("minutes", "must be a positive integer"));
    }

    let banked_seconds = minutes
        .checked_mul(60)
        .and_then(|extra| timer.banked_seconds.checked_add(extra))
        .ok_or_else(|| {
            AppError::validation("minutes", format!("{minutes} minutes is out of range"))
        })?;

    Ok(Transition::Changed(Timer {
        banked_seconds,
        ..timer.clone()
    }))
}
