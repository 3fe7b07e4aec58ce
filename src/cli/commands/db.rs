use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

fn step(label: &str) {
    println!("{CYAN}▶ {label}…{RESET}");
}

fn done(label: &str) {
    println!("{GREEN}✔ {label}{RESET}\n");
}

fn failed(label: &str, detail: &str) {
    println!("{RED}✘ {label}{RESET} {detail}\n");
}

/// SQLite page check plus dangling lane references.
fn check(pool: &DbPool) -> AppResult<bool> {
    step("Running integrity check");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        failed("Integrity check failed:", &integrity);
        return Ok(false);
    }

    let dangling: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM timers t
         LEFT JOIN tracks tr ON tr.id = t.track_id
         WHERE t.is_combo = 0 AND tr.id IS NULL",
        [],
        |row| row.get(0),
    )?;
    if dangling > 0 {
        failed(
            "Lane references broken:",
            &format!("{dangling} timer(s) point to a missing track"),
        );
        return Ok(false);
    }

    done("Integrity check passed.");
    Ok(true)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check: run_check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        step("Running migrations");
        init_db(&pool.conn)?;
        done("Migration completed.");
    }

    if *info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *run_check {
        check(&pool)?;
    }

    if *vacuum {
        step("Running VACUUM");
        pool.conn.execute_batch("VACUUM;")?;
        ttlog(&pool.conn, "vacuum", "", "Database vacuumed")?;
        done("Vacuum completed.");
    }

    Ok(())
}
