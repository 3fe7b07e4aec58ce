use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Lane kinds offered by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackKind {
    FastTrack,
    SandTrack,
    MudTrack,
    CrawlerTrack,
    DriftTrack,
}

impl TrackKind {
    pub const ALL: [TrackKind; 5] = [
        TrackKind::FastTrack,
        TrackKind::SandTrack,
        TrackKind::MudTrack,
        TrackKind::CrawlerTrack,
        TrackKind::DriftTrack,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TrackKind::FastTrack => "FAST_TRACK",
            TrackKind::SandTrack => "SAND_TRACK",
            TrackKind::MudTrack => "MUD_TRACK",
            TrackKind::CrawlerTrack => "CRAWLER_TRACK",
            TrackKind::DriftTrack => "DRIFT_TRACK",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.to_db_str() == s)
    }

    /// Helper: accept CLI input like `fast`, `fast_track`, `FAST-TRACK`
    pub fn from_code(code: &str) -> AppResult<Self> {
        let mut norm = code.trim().to_uppercase().replace('-', "_");
        if !norm.ends_with("_TRACK") {
            norm.push_str("_TRACK");
        }
        Self::from_db_str(&norm).ok_or_else(|| AppError::InvalidTrackKind(code.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::FastTrack => "Fast",
            TrackKind::SandTrack => "Sand",
            TrackKind::MudTrack => "Mud",
            TrackKind::CrawlerTrack => "Crawler",
            TrackKind::DriftTrack => "Drift",
        }
    }
}

/// A physical lane. Read-only from the timer engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: i64,
    pub name: String,
    pub kind: TrackKind,
    pub active: bool,
}
