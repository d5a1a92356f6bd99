mod support;

use chrono::{Duration, Local};
use predicates::str::contains;

use support::{tm_cmd, TestHome};

#[test]
fn remind_schedules_only_fully_dated_tasks() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args([
            "add",
            "Fully dated",
            "--due-date",
            "2030-05-01",
            "--due-time",
            "08:00",
        ])
        .assert()
        .success();
    tm_cmd(&home)
        .args(["add", "Date only", "--due-date", "2030-05-01"])
        .assert()
        .success();
    tm_cmd(&home).args(["add", "Undated"]).assert().success();

    tm_cmd(&home)
        .args(["remind"])
        .assert()
        .success()
        .stdout(contains("Scheduled: 1"))
        .stdout(contains("Tasks considered: 3"));

    let records = home.read_notifications();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Fully dated");
    assert_eq!(records[0]["trigger"]["type"], "calendar");
    assert_eq!(records[0]["trigger"]["repeats"], false);
    assert_eq!(records[0]["trigger"]["at"], "2030-05-01T08:00:00");
}

#[test]
fn overdue_reminders_repeat_with_prefixed_body() {
    let home = TestHome::new();
    let yesterday = (Local::now() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();

    tm_cmd(&home)
        .args([
            "add",
            "Past due",
            "--description",
            "Chase it",
            "--due-date",
            &yesterday,
            "--due-time",
            "09:00",
        ])
        .assert()
        .success();

    tm_cmd(&home)
        .args(["remind"])
        .assert()
        .success()
        .stdout(contains("Scheduled: 1"));

    let records = home.read_notifications();
    assert_eq!(records[0]["body"], "Overdue: Chase it");
    assert_eq!(records[0]["trigger"]["repeats"], true);
}

#[test]
fn remind_respects_the_search_filter() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args([
            "add",
            "Water plants",
            "--due-date",
            "2030-05-01",
            "--due-time",
            "08:00",
        ])
        .assert()
        .success();
    tm_cmd(&home)
        .args([
            "add",
            "File taxes",
            "--due-date",
            "2030-05-02",
            "--due-time",
            "08:00",
        ])
        .assert()
        .success();

    tm_cmd(&home)
        .args(["remind", "--search", "taxes"])
        .assert()
        .success()
        .stdout(contains("Scheduled: 1"))
        .stdout(contains("Tasks considered: 1"));

    let records = home.read_notifications();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "File taxes");
}

#[test]
fn notifications_can_stream_to_stdout() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args([
            "add",
            "Streamed",
            "--due-date",
            "2030-05-01",
            "--due-time",
            "08:00",
        ])
        .assert()
        .success();

    // With the sink on stdout, the command's own output is suppressed and
    // each line is one JSON request.
    let output = tm_cmd(&home)
        .args(["remind", "--notifications", "-"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["schema_version"], "tm.notify.v1");
    assert_eq!(record["title"], "Streamed");
}
