use crate::errors::AppResult;
use crate::models::track::TrackKind;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

/// Lanes seeded into an empty catalog.
const DEFAULT_TRACKS: [(&str, TrackKind); 4] = [
    ("Fast Track", TrackKind::FastTrack),
    ("Sand Track", TrackKind::SandTrack),
    ("Mud Track", TrackKind::MudTrack),
    ("Crawler Track", TrackKind::CrawlerTrack),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the lane catalog.
fn create_tracks_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL UNIQUE,
            kind    TEXT NOT NULL,
            active  INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )?;
    Ok(())
}

/// Create the `timers` table. A row is either lane-bound or combo, never both.
fn create_timers_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timers (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name     TEXT NOT NULL CHECK(length(trim(customer_name)) > 0),
            track_id          INTEGER REFERENCES tracks(id),
            is_combo          INTEGER NOT NULL DEFAULT 0,
            allocated_minutes INTEGER NOT NULL CHECK(allocated_minutes > 0),
            status            TEXT NOT NULL DEFAULT 'PAUSED' CHECK(status IN ('RUNNING','PAUSED')),
            started_at        TEXT,
            banked_seconds    INTEGER NOT NULL CHECK(banked_seconds >= 0),
            version           INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL,
            CHECK ((is_combo = 1 AND track_id IS NULL) OR (is_combo = 0 AND track_id IS NOT NULL)),
            CHECK ((status = 'RUNNING') = (started_at IS NOT NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_timers_track ON timers(track_id);
        CREATE INDEX IF NOT EXISTS idx_timers_created ON timers(is_combo, created_at);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Databases created before compare-and-set updates lack `timers.version`.
fn migrate_add_version_column(conn: &Connection) -> AppResult<()> {
    let version = "20250310_0002_add_timer_version";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "timers", "version")? {
        conn.execute(
            "ALTER TABLE timers ADD COLUMN version INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
        success(format!(
            "Migration applied: {} → added 'version' to timers table",
            version
        ));
    }

    mark_applied(conn, version, "Added compare-and-set version to timers")
}

/// Fill an empty lane catalog with the venue's standard lanes.
fn seed_default_tracks(conn: &Connection) -> AppResult<()> {
    let version = "20250310_0003_seed_default_tracks";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
    if count == 0 {
        let mut stmt = conn.prepare("INSERT INTO tracks (name, kind, active) VALUES (?1, ?2, 1)")?;
        for (name, kind) in DEFAULT_TRACKS {
            stmt.execute(params![name, kind.to_db_str()])?;
        }
        success(format!("Seeded {} default tracks.", DEFAULT_TRACKS.len()));
    }

    mark_applied(conn, version, "Seeded default lane catalog")
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Lane catalog
    if !table_exists(conn, "tracks")? {
        create_tracks_table(conn)?;
        success("Created tracks table.");
    }

    // 3) Timers
    if !table_exists(conn, "timers")? {
        create_timers_table(conn)?;
        success("Created timers table.");
    } else {
        migrate_add_version_column(conn)?;
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_timers_track ON timers(track_id);
            CREATE INDEX IF NOT EXISTS idx_timers_created ON timers(is_combo, created_at);
            "#,
        )?;
    }

    // 4) Reference data
    seed_default_tracks(conn)?;

    Ok(())
}
