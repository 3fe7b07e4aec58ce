/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Remaining-time colour, as a share of the allocated package:
/// \>50% → green, \>25% → yellow, otherwise red.
pub fn color_for_remaining(remaining_seconds: i64, allocated_minutes: u32) -> &'static str {
    let allocated = i64::from(allocated_minutes) * 60;
    if allocated <= 0 {
        return RED;
    }
    let pct = remaining_seconds * 100 / allocated;
    if pct > 50 {
        GREEN
    } else if pct > 25 {
        YELLOW
    } else {
        RED
    }
}

/// Wrap `value` in `color`, or grey it out when it is a placeholder.
pub fn colorize(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
