mod support;

use chrono::{Duration, Local};
use predicates::str::contains;
use serde_json::Value;

use support::{created_task_id, tm_cmd, TestHome};

fn show_json(home: &TestHome, id: &str) -> Value {
    let output = tm_cmd(home)
        .args(["show", id, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("parse show output")
}

#[test]
fn add_round_trips_every_field() {
    let home = TestHome::new();

    let output = tm_cmd(&home)
        .args([
            "add",
            "Collect parcel",
            "--description",
            "Bring ID",
            "--due-date",
            "2030-01-15",
            "--due-time",
            "14:30",
            "--priority",
            "high",
            "--category",
            "Personal",
            "--place",
            "Post office",
            "--lat",
            "40.7",
            "--lon",
            "20.3",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);
    assert!(id.starts_with("task-"));

    let shown = show_json(&home, &id);
    let task = &shown["data"]["task"];
    assert_eq!(task["title"], "Collect parcel");
    assert_eq!(task["description"], "Bring ID");
    assert_eq!(task["due_date"], "2030-01-15");
    assert_eq!(task["due_time"], "14:30:00");
    assert_eq!(task["priority"], 1);
    assert_eq!(task["category"], "Personal");
    assert_eq!(task["place"]["name"], "Post office");
    assert_eq!(task["is_complete"], false);
    assert_eq!(shown["data"]["status"], "Pending");
}

#[test]
fn edit_keeps_omitted_fields_but_rewrites_priority() {
    let home = TestHome::new();

    let output = tm_cmd(&home)
        .args([
            "add",
            "Draft report",
            "--description",
            "First pass",
            "--category",
            "Work",
            "--priority",
            "high",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);

    tm_cmd(&home)
        .args(["edit", &id, "--title", "Draft quarterly report"])
        .assert()
        .success()
        .stdout(contains("Task updated"));

    let shown = show_json(&home, &id);
    let task = &shown["data"]["task"];
    assert_eq!(task["title"], "Draft quarterly report");
    assert_eq!(task["description"], "First pass");
    assert_eq!(task["category"], "Work");
    // An edit that does not restate priority resets it to None(0).
    assert_eq!(task["priority"], 0);

    tm_cmd(&home)
        .args(["edit", &id, "--priority", "medium"])
        .assert()
        .success();
    let shown = show_json(&home, &id);
    assert_eq!(shown["data"]["task"]["priority"], 2);
}

#[test]
fn partial_id_resolves_when_unambiguous() {
    let home = TestHome::new();

    let output = tm_cmd(&home)
        .args(["add", "Findable", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);
    let suffix = id.strip_prefix("task-").expect("prefixed id");

    tm_cmd(&home)
        .args(["show", suffix])
        .assert()
        .success()
        .stdout(contains("Findable"));
}

#[test]
fn overdue_complete_delete_walkthrough() {
    let home = TestHome::new();
    let yesterday = (Local::now() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();

    let output = tm_cmd(&home)
        .args([
            "add",
            "Yesterday's errand",
            "--due-date",
            &yesterday,
            "--due-time",
            "09:00",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);

    let shown = show_json(&home, &id);
    assert_eq!(shown["data"]["status"], "Overdue");

    tm_cmd(&home)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(contains("Task completed"));
    let shown = show_json(&home, &id);
    assert_eq!(shown["data"]["status"], "Complete");

    tm_cmd(&home)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(contains("Task deleted"));
    tm_cmd(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Total: 0"));
}

#[test]
fn done_toggles_back_to_pending() {
    let home = TestHome::new();

    let output = tm_cmd(&home)
        .args(["add", "Toggle me", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);

    tm_cmd(&home)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(contains("Task completed"));
    tm_cmd(&home)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(contains("Task reopened"));

    let shown = show_json(&home, &id);
    assert_eq!(shown["data"]["status"], "Pending");
}

#[test]
fn completing_cancels_the_reminder() {
    let home = TestHome::new();

    let output = tm_cmd(&home)
        .args(["add", "Cancelable", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_task_id(&output);

    tm_cmd(&home).args(["done", &id]).assert().success();

    let records = home.read_notifications();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["cancel"], format!("task:{id}"));
}
