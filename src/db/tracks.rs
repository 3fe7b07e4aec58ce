//! Lane catalog queries.
//!
//! The timer engine only reads the catalog (`load_track`, `load_tracks`).
//! `insert_track` and `set_track_active` exist for venue staff maintaining
//! lanes through `racetimer track`, outside any timer operation.

use crate::errors::{AppError, AppResult};
use crate::models::track::{Track, TrackKind};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_track(row: &Row) -> rusqlite::Result<Track> {
    let kind_str: String = row.get("kind")?;
    let kind = TrackKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTrackKind(kind_str.clone())),
        )
    })?;

    Ok(Track {
        id: row.get("id")?,
        name: row.get("name")?,
        kind,
        active: row.get::<_, i64>("active")? == 1,
    })
}

pub fn load_track(conn: &Connection, id: i64) -> AppResult<Option<Track>> {
    let track = conn
        .query_row(
            "SELECT id, name, kind, active FROM tracks WHERE id = ?1",
            [id],
            map_track,
        )
        .optional()?;
    Ok(track)
}

pub fn load_tracks(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Track>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, active FROM tracks
         WHERE active = 1 OR ?1
         ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([include_inactive], map_track)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_track(conn: &Connection, name: &str, kind: TrackKind) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tracks (name, kind, active) VALUES (?1, ?2, 1)",
        params![name, kind.to_db_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_track_active(conn: &Connection, id: i64, active: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tracks SET active = ?1 WHERE id = ?2",
        params![active, id],
    )?;
    if changed == 0 {
        return Err(AppError::TrackNotFound(id));
    }
    Ok(())
}
