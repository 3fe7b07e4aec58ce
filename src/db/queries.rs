use crate::errors::{AppError, AppResult};
use crate::models::status::TimerStatus;
use crate::models::target::Target;
use crate::models::timer::Timer;
use crate::models::track::{Track, TrackKind};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const TIMER_COLUMNS: &str = "t.id AS id, t.customer_name AS customer_name, t.track_id AS track_id,
     t.is_combo AS is_combo, t.allocated_minutes AS allocated_minutes, t.status AS status,
     t.started_at AS started_at, t.banked_seconds AS banked_seconds, t.version AS version,
     t.created_at AS created_at";

const TRACK_COLUMNS: &str = "tr.id AS tr_id, tr.name AS tr_name, tr.kind AS tr_kind, tr.active AS tr_active";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ts_from_db(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn map_timer_row(row: &Row) -> Result<Timer> {
    let track_id: Option<i64> = row.get("track_id")?;
    let is_combo = row.get::<_, i64>("is_combo")? == 1;

    let target = Target::from_request(track_id, is_combo).map_err(|e| conversion_error(2, e))?;

    let status_str: String = row.get("status")?;
    let status = TimerStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            5,
            AppError::Other(format!("Invalid timer status: {}", status_str)),
        )
    })?;

    let started_at = row
        .get::<_, Option<String>>("started_at")?
        .map(|s| ts_from_db(&s))
        .transpose()
        .map_err(|e| conversion_error(6, e))?;

    let created_str: String = row.get("created_at")?;
    let created_at = ts_from_db(&created_str).map_err(|e| conversion_error(9, e))?;

    Ok(Timer {
        id: row.get("id")?,
        customer_name: row.get("customer_name")?,
        target,
        allocated_minutes: row.get("allocated_minutes")?,
        status,
        started_at,
        banked_seconds: row.get("banked_seconds")?,
        version: row.get("version")?,
        created_at,
    })
}

/// Map the joined `tr_*` columns; NULL for combo timers.
fn map_joined_track(row: &Row) -> Result<Option<Track>> {
    let Some(id) = row.get::<_, Option<i64>>("tr_id")? else {
        return Ok(None);
    };
    let kind_str: String = row.get("tr_kind")?;
    let kind = TrackKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(12, AppError::InvalidTrackKind(kind_str.clone())))?;

    Ok(Some(Track {
        id,
        name: row.get("tr_name")?,
        kind,
        active: row.get::<_, i64>("tr_active")? == 1,
    }))
}

pub fn insert_timer(conn: &Connection, timer: &Timer) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timers (customer_name, track_id, is_combo, allocated_minutes, status,
                             started_at, banked_seconds, version, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
        params![
            timer.customer_name,
            timer.target.track_id(),
            if timer.target.is_combo() { 1 } else { 0 },
            timer.allocated_minutes,
            timer.status.to_db_str(),
            timer.started_at.as_ref().map(ts_to_db),
            timer.banked_seconds,
            ts_to_db(&timer.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_timer(conn: &Connection, id: i64) -> AppResult<Option<Timer>> {
    let sql = format!("SELECT {TIMER_COLUMNS} FROM timers t WHERE t.id = ?1");
    let timer = conn.query_row(&sql, [id], map_timer_row).optional()?;
    Ok(timer)
}

/// All timers with their lane, combo timers first, then by creation.
pub fn load_timers_with_tracks(conn: &Connection) -> AppResult<Vec<(Timer, Option<Track>)>> {
    let sql = format!(
        "SELECT {TIMER_COLUMNS}, {TRACK_COLUMNS}
         FROM timers t
         LEFT JOIN tracks tr ON tr.id = t.track_id
         ORDER BY t.is_combo DESC, t.created_at ASC, t.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], |row| Ok((map_timer_row(row)?, map_joined_track(row)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Write the `(status, started_at, banked_seconds)` triple only if nobody
/// else changed the row since `expected_version` was read.
///
/// Returns `false` when the version no longer matches.
pub fn update_timer_cas(conn: &Connection, timer: &Timer, expected_version: i64) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE timers
            SET status = ?1, started_at = ?2, banked_seconds = ?3, version = version + 1
          WHERE id = ?4 AND version = ?5",
        params![
            timer.status.to_db_str(),
            timer.started_at.as_ref().map(ts_to_db),
            timer.banked_seconds,
            timer.id,
            expected_version,
        ],
    )?;
    Ok(changed == 1)
}

pub fn delete_timer(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM timers WHERE id = ?1", [id])?)
}

pub fn count_timers(conn: &Connection) -> AppResult<(i64, i64)> {
    let (running, paused): (i64, i64) = conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN status = 'RUNNING' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN status = 'PAUSED' THEN 1 ELSE 0 END), 0)
         FROM timers",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok((running, paused))
}
