#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, TimeZone, Utc};
use racetimer::config::Config;
use racetimer::db::initialize::init_db;
use racetimer::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rt() -> Command {
    cargo_bin_cmd!("racetimer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_racetimer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    // WAL sidecars from a previous run
    fs::remove_file(format!("{db_path}-wal")).ok();
    fs::remove_file(format!("{db_path}-shm")).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema through the CLI (as an operator would)
pub fn init_cli_db(db_path: &str) {
    rt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a fresh, migrated store for library-level tests
pub fn open_store(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn cfg() -> Config {
    Config::default()
}

/// Virtual clock origin
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0)
        .single()
        .expect("valid instant")
}

/// Virtual clock: `secs` after the origin
pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(secs)
}

/// Same instant as `at`, formatted for `--now`
pub fn now_arg(secs: i64) -> String {
    at(secs).to_rfc3339()
}
