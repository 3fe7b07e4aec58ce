//! Formatting utilities used for CLI outputs.

use crate::models::status::TimerStatus;
use crate::utils::colors::{GREEN, RED, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `m:ss`, e.g. `25:00`, `0:07`.
pub fn format_clock(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{}:{:02}", s / 60, s % 60)
}

/// Label and colour for a timer badge. Expiry overrides the stored status.
pub fn describe_status(status: TimerStatus, expired: bool) -> (&'static str, &'static str) {
    if expired {
        return ("EXPIRED", RED);
    }
    match status {
        TimerStatus::Running => ("RUNNING", GREEN),
        TimerStatus::Paused => ("PAUSED", YELLOW),
    }
}
