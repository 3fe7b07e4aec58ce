//! Display-board client state.
//!
//! The engine is push-free; a board polls `list` and owns the only
//! load-bearing client state: which timers have already sounded.

use crate::errors::AppResult;
use crate::models::view::TimerView;
use std::collections::HashSet;

/// Per-timer "already alerted" set.
#[derive(Debug, Default)]
pub struct AlertTracker {
    fired: HashSet<i64>,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one successful poll. Returns the ids that crossed zero since
    /// the last poll, in poll order.
    pub fn observe(&mut self, views: &[TimerView]) -> Vec<i64> {
        // deleted timers
        let present: HashSet<i64> = views.iter().map(|v| v.id).collect();
        self.fired.retain(|id| present.contains(id));

        let mut newly = Vec::new();
        for v in views {
            if v.remaining_seconds <= 0 {
                if self.fired.insert(v.id) {
                    newly.push(v.id);
                }
            } else {
                self.fired.remove(&v.id);
            }
        }
        newly
    }

    pub fn forget(&mut self, id: i64) {
        self.fired.remove(&id);
    }

    pub fn has_fired(&self, id: i64) -> bool {
        self.fired.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

/// What the board should show after a poll.
#[derive(Debug)]
pub struct PollOutcome<'a> {
    pub views: &'a [TimerView],
    pub alerts: Vec<i64>,
    /// The poll failed and `views` is the last known projection.
    pub stale: bool,
}

/// Polling display board state.
#[derive(Debug, Default)]
pub struct DisplayBoard {
    last: Vec<TimerView>,
    alerts: AlertTracker,
    failures: u32,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one poll result into the board.
    ///
    /// A failed poll keeps the previous projection and raises no alerts.
    pub fn apply_poll(&mut self, result: AppResult<Vec<TimerView>>) -> PollOutcome<'_> {
        match result {
            Ok(views) => {
                self.failures = 0;
                let alerts = self.alerts.observe(&views);
                self.last = views;
                PollOutcome {
                    views: &self.last,
                    alerts,
                    stale: false,
                }
            }
            Err(_) => {
                self.failures += 1;
                PollOutcome {
                    views: &self.last,
                    alerts: Vec::new(),
                    stale: true,
                }
            }
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    pub fn alerts(&self) -> &AlertTracker {
        &self.alerts
    }
}
