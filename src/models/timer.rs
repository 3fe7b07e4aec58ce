use super::{status::TimerStatus, target::Target};
use chrono::{DateTime, Utc};

/// One countdown instance as persisted in the `timers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub id: i64,                           // ⇔ timers.id
    pub customer_name: String,             // ⇔ timers.customer_name
    pub target: Target,                    // ⇔ timers.track_id / timers.is_combo
    pub allocated_minutes: u32,            // ⇔ timers.allocated_minutes
    pub status: TimerStatus,               // ⇔ timers.status ('RUNNING' | 'PAUSED')
    pub started_at: Option<DateTime<Utc>>, // ⇔ timers.started_at (RFC3339, NULL when paused)
    pub banked_seconds: i64,               // ⇔ timers.banked_seconds
    pub version: i64,                      // ⇔ timers.version (compare-and-set token)
    pub created_at: DateTime<Utc>,         // ⇔ timers.created_at
}

impl Timer {
    /// A fresh, paused timer holding its full package. `id` and `version`
    /// are assigned by the store.
    pub fn new(
        customer_name: &str,
        target: Target,
        allocated_minutes: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            customer_name: customer_name.trim().to_string(),
            target,
            allocated_minutes,
            status: TimerStatus::Paused,
            started_at: None,
            banked_seconds: Self::package_seconds(allocated_minutes),
            version: 0,
            created_at: now,
        }
    }

    pub fn package_seconds(minutes: u32) -> i64 {
        i64::from(minutes) * 60
    }

    pub fn allocated_seconds(&self) -> i64 {
        Self::package_seconds(self.allocated_minutes)
    }
}
