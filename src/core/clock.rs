//! Wall-clock access for the engine.
//!
//! Every engine entry point takes `now` explicitly; callers decide where it
//! comes from (system clock, `--now` override, or a test's virtual clock).

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SubsecRound, Utc};

/// Current instant at whole-second precision.
pub fn now() -> DateTime<Utc> {
    instant(Utc::now())
}

/// Drop sub-second precision so banked arithmetic is exact across
/// any number of pause/resume cycles.
pub fn instant(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(0)
}

/// Parse a `--now` override (RFC3339).
pub fn parse_instant(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| instant(dt.with_timezone(&Utc)))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}
