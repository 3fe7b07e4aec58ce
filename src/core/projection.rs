//! Read side: stored state + `now` → views for any number of pollers.
//!
//! Nothing here writes to the store, so readers never lock and never
//! disturb each other.

use crate::core::remaining::{display_remaining, is_expired, split_remaining};
use crate::db::pool::DbPool;
use crate::db::queries::load_timers_with_tracks;
use crate::errors::AppResult;
use crate::models::board::{Board, LaneBucket};
use crate::models::timer::Timer;
use crate::models::track::{Track, TrackKind};
use crate::models::view::TimerView;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub fn project(timer: &Timer, track: Option<Track>, now: DateTime<Utc>) -> TimerView {
    let remaining = display_remaining(timer, now);
    let (minutes, seconds) = split_remaining(remaining);

    TimerView {
        id: timer.id,
        customer_name: timer.customer_name.clone(),
        track,
        allocated_minutes: timer.allocated_minutes,
        remaining_seconds: remaining,
        remaining_minutes: minutes,
        remaining_seconds_only: seconds,
        status: timer.status,
        expired: is_expired(timer, now),
        is_combo: timer.target.is_combo(),
        created_at: timer.created_at,
    }
}

/// Every timer, combo first, then in creation order.
pub fn list(pool: &mut DbPool, now: DateTime<Utc>) -> AppResult<Vec<TimerView>> {
    let rows = load_timers_with_tracks(&pool.conn)?;
    Ok(rows
        .into_iter()
        .map(|(timer, track)| project(&timer, track, now))
        .collect())
}

/// Position of a lane kind in the canonical order; unknown kinds sort last.
fn lane_rank(kind: TrackKind, lane_order: &[TrackKind]) -> usize {
    lane_order
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(lane_order.len())
}

/// Group views into the combo pool and one bucket per occupied lane.
///
/// Lanes follow `lane_order`, ties broken by lane name. Lanes without
/// timers never appear. Timer order inside a bucket is preserved.
pub fn group(views: &[TimerView], lane_order: &[TrackKind]) -> Board {
    let mut combo = Vec::new();
    let mut lanes: BTreeMap<i64, LaneBucket> = BTreeMap::new();

    for v in views {
        if v.is_combo {
            combo.push(v.clone());
            continue;
        }
        if let Some(track) = &v.track {
            lanes
                .entry(track.id)
                .or_insert_with(|| LaneBucket {
                    track: track.clone(),
                    timers: Vec::new(),
                })
                .timers
                .push(v.clone());
        }
    }

    let mut lanes: Vec<LaneBucket> = lanes.into_values().collect();
    lanes.sort_by(|a, b| {
        lane_rank(a.track.kind, lane_order)
            .cmp(&lane_rank(b.track.kind, lane_order))
            .then_with(|| a.track.name.cmp(&b.track.name))
    });

    Board { combo, lanes }
}
