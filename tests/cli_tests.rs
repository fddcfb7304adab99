mod common;
use common::{init_db_with_task, setup_test_db, tc, temp_out};
use predicates::prelude::*;
use std::env;
use std::fs;

#[test]
fn test_init_user_and_task_listing() {
    let db_path = setup_test_db("cli_listing");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("acme"));

    tc().args(["--db", &db_path, "--user", "1", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"))
        .stdout(predicate::str::contains("pending"));
}

#[test]
fn test_timer_start_is_idempotent() {
    let db_path = setup_test_db("cli_timer_start");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"running\": true"))
        .stdout(predicate::str::contains("\"changed\": true"));

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));

    tc().args(["--db", &db_path, "--user", "1", "task", "list", "--running"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"));
}

#[test]
fn test_timer_pause_then_status() {
    let db_path = setup_test_db("cli_timer_pause");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--user", "1", "timer", "pause", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pause applied"));

    tc().args(["--db", &db_path, "--user", "1", "timer", "status", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"paused\""))
        .stdout(predicate::str::contains("\"last_started_at\": null"));
}

#[test]
fn test_timer_reset_zeroes_total() {
    let db_path = setup_test_db("cli_timer_reset");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--user", "1", "timer", "reset", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_seconds\": 0"))
        .stdout(predicate::str::contains("\"running\": false"))
        .stdout(predicate::str::contains("\"status\": \"pending\""));
}

#[test]
fn test_unknown_entity_fails() {
    let db_path = setup_test_db("cli_not_found");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "stop", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity 99 not found"));
}

#[test]
fn test_non_owner_cannot_drive_timer() {
    let db_path = setup_test_db("cli_unauthorized");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "user", "add", "bob", "--tenant", "acme"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--user", "2", "timer", "start", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("may not modify"));
}

#[test]
fn test_missing_acting_user_fails() {
    let db_path = setup_test_db("cli_no_user");
    init_db_with_task(&db_path);

    let mut home = env::temp_dir();
    home.push("teamclock_cli_no_user_home");
    fs::create_dir_all(&home).ok();

    tc().env("HOME", &home)
        .args(["--db", &db_path, "timer", "status", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no acting user"));
}

#[test]
fn test_export_csv_and_report() {
    let db_path = setup_test_db("cli_export");
    init_db_with_task(&db_path);

    for op in ["start", "stop"] {
        tc().args(["--db", &db_path, "--user", "1", "timer", op, "1"])
            .assert()
            .success();
    }

    let out = temp_out("cli_export", "csv");
    tc().args([
        "--db", &db_path, "--user", "1", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("entry_id,entity_id,kind,title"));
    assert!(content.contains("Write report"));
    assert!(content.contains("alice"));

    tc().args(["--db", &db_path, "--user", "1", "report", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"))
        .stdout(predicate::str::contains("Worked:"));
}

#[test]
fn test_export_json_for_entity() {
    let db_path = setup_test_db("cli_export_json");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1"])
        .assert()
        .success();

    let out = temp_out("cli_export_json", "json");
    tc().args([
        "--db", &db_path, "--user", "1", "export", "--format", "json", "--file", &out,
        "--entity", "1",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(|a| a.len()), Some(1));
    assert!(rows[0]["end_time"].is_null());
}

#[test]
fn test_log_print_lists_timer_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_task(&db_path);

    tc().args(["--db", &db_path, "--user", "1", "timer", "start", "1"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("migration_applied"))
        .stdout(predicate::str::contains("task #1"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_task(&db_path);

    let out = temp_out("cli_backup", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    tc().args(["--db", &db_path, "backup", "--file", &out, "--compress", "--force"])
        .assert()
        .success();

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&out).is_err());
}
