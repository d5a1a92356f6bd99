mod support;

use predicates::str::contains;

use support::{tm_cmd, TestHome};

#[test]
fn add_then_list() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stdout(contains("Task created"));

    tm_cmd(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Buy milk"))
        .stdout(contains("Total: 1"));
}

#[test]
fn empty_list_has_placeholder() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("No tasks added yet"));
}

#[test]
fn whitespace_title_is_a_user_error() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Title cannot be empty"));

    tm_cmd(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Total: 0"));
}

#[test]
fn unknown_task_is_a_user_error() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["show", "zzz"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));
}

#[test]
fn json_envelope_carries_command_and_status() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["add", "Enveloped", "--json"])
        .assert()
        .success()
        .stdout(contains("\"command\": \"add\""))
        .stdout(contains("\"status\": \"success\""))
        .stdout(contains("\"schema_version\": \"tm.v1\""));
}

#[test]
fn quiet_suppresses_human_output() {
    let home = TestHome::new();

    tm_cmd(&home)
        .args(["add", "Silent", "--quiet"])
        .assert()
        .success()
        .stdout("");
}
