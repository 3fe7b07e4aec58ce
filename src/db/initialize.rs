use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Prepare a store file: WAL journal, then schema migrations.
///
/// With WAL, display boards keep reading while an operator's write
/// transaction is open.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        warning(format!(
            "Journal mode is '{mode}': readers may briefly block behind writers."
        ));
    }

    run_pending_migrations(conn)
}
