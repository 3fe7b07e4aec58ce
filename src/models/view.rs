use super::{status::TimerStatus, track::Track};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only projection of a timer at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub id: i64,
    pub customer_name: String,
    pub track: Option<Track>,
    pub allocated_minutes: u32,
    pub remaining_seconds: i64,
    pub remaining_minutes: i64,
    pub remaining_seconds_only: i64,
    pub status: TimerStatus,
    pub expired: bool,
    pub is_combo: bool,
    pub created_at: DateTime<Utc>,
}
