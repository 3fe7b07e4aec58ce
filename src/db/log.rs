//! Audit trail: one `log` row per successful mutation.

use crate::core::clock;
use crate::db::queries::ts_to_db;
use crate::errors::AppResult;
use rusqlite::{Connection, params};

/// Append an audit row and return its id.
///
/// Stamped with the wall clock, not the engine's `now`: the trail records
/// when an operator acted, even during a `--now` replay.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<i64> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![
        ts_to_db(&clock::now()),
        operation,
        target,
        message
    ])?;

    Ok(conn.last_insert_rowid())
}
