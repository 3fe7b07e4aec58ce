use crate::db::pool::DbPool;
use crate::db::queries::count_timers;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TIMERS BY STATUS
    //
    let (running, paused) = count_timers(&pool.conn)?;
    println!(
        "{}• Timers:{} {}{}{} ({} running, {} paused)",
        CYAN,
        RESET,
        GREEN,
        running + paused,
        RESET,
        running,
        paused
    );

    //
    // 3) TRACKS
    //
    let tracks: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tracks WHERE active = 1", [], |row| {
            row.get(0)
        })?;
    println!("{}• Active tracks:{} {}", CYAN, RESET, tracks);

    //
    // 4) OLDEST TIMER
    //
    let oldest: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM timers ORDER BY created_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!(
        "{}• Oldest timer:{} {}",
        CYAN,
        RESET,
        oldest.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
