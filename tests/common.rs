#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;
use teamclock::core::clock::FixedClock;
use teamclock::db::initialize::init_db;
use teamclock::db::pool::DbPool;

pub fn tc() -> Command {
    cargo_bin_cmd!("teamclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_teamclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
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

/// Initialize DB through the CLI and add user #1 ("alice", tenant acme)
/// owning task #1.
pub fn init_db_with_task(db_path: &str) {
    tc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", db_path, "user", "add", "alice", "--tenant", "acme"])
        .assert()
        .success();

    tc().args(["--db", db_path, "--user", "1", "task", "add", "Write report"])
        .assert()
        .success();
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(secs)
}

pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("migrate");
    pool
}

pub fn clock_at(secs: i64) -> FixedClock {
    FixedClock::new(at(secs))
}
