use serde::Serialize;

/// Persisted timer state. Expiry is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerStatus {
    Running,
    Paused,
}

impl TimerStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimerStatus::Running => "RUNNING",
            TimerStatus::Paused => "PAUSED",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "RUNNING" => Some(TimerStatus::Running),
            "PAUSED" => Some(TimerStatus::Paused),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerStatus::Running)
    }
}
