use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// What a timer counts down for: one lane, or the cross-lane combo pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "trackId", rename_all = "lowercase")]
pub enum Target {
    Lane(i64),
    Combo,
}

impl Target {
    /// Build a target from the two loosely-typed request fields.
    /// Exactly one of them must be meaningful.
    pub fn from_request(track_id: Option<i64>, is_combo: bool) -> AppResult<Self> {
        match (track_id, is_combo) {
            (Some(id), false) => Ok(Target::Lane(id)),
            (None, true) => Ok(Target::Combo),
            (Some(_), true) => Err(AppError::validation(
                "target",
                "combo timers must not have a track id",
            )),
            (None, false) => Err(AppError::validation(
                "target",
                "a track id is required for lane timers (or pass --combo)",
            )),
        }
    }

    pub fn track_id(&self) -> Option<i64> {
        match self {
            Target::Lane(id) => Some(*id),
            Target::Combo => None,
        }
    }

    pub fn is_combo(&self) -> bool {
        matches!(self, Target::Combo)
    }
}
