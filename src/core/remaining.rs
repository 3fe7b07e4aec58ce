//! Pure time computation. Nothing here touches the store.

use crate::models::status::TimerStatus;
use crate::models::timer::Timer;
use chrono::{DateTime, Utc};

/// Whole seconds since the timer last entered `RUNNING`.
///
/// A `now` earlier than `started_at` (clock stepped backwards) counts as zero.
pub fn elapsed_seconds(timer: &Timer, now: DateTime<Utc>) -> i64 {
    match (timer.status, timer.started_at) {
        (TimerStatus::Running, Some(started)) => (now - started).num_seconds().max(0),
        _ => 0,
    }
}

/// Unclamped remaining time; negative once a running timer has overrun.
pub fn compute_remaining(timer: &Timer, now: DateTime<Utc>) -> i64 {
    timer.banked_seconds - elapsed_seconds(timer, now)
}

/// Remaining time as shown to viewers (never below zero).
pub fn display_remaining(timer: &Timer, now: DateTime<Utc>) -> i64 {
    compute_remaining(timer, now).max(0)
}

/// Presentation-only expiry flag. The persisted status stays `RUNNING`.
pub fn is_expired(timer: &Timer, now: DateTime<Utc>) -> bool {
    timer.status.is_running() && display_remaining(timer, now) == 0
}

/// `(remainingMinutes, remainingSecondsOnly)`
pub fn split_remaining(seconds: i64) -> (i64, i64) {
    let s = seconds.max(0);
    (s / 60, s % 60)
}
