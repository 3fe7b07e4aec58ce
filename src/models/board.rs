use super::{track::Track, view::TimerView};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneBucket {
    pub track: Track,
    pub timers: Vec<TimerView>,
}

/// Grouped display view: the combo pool plus one bucket per lane that has timers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    pub combo: Vec<TimerView>,
    pub lanes: Vec<LaneBucket>,
}

impl Board {
    pub fn is_empty(&self) -> bool {
        self.combo.is_empty() && self.lanes.is_empty()
    }

    pub fn timer_count(&self) -> usize {
        self.combo.len() + self.lanes.iter().map(|b| b.timers.len()).sum::<usize>()
    }
}
