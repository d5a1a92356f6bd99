#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated data directory for one test
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("tm.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn notifications_file(&self) -> PathBuf {
        self.dir.path().join("notifications.jsonl")
    }

    /// Parse every JSONL record written to the default notification sink
    pub fn read_notifications(&self) -> Vec<serde_json::Value> {
        let path = self.notifications_file();
        if !path.exists() {
            return Vec::new();
        }
        let contents = fs::read_to_string(&path).expect("read notifications");
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("parse notification"))
            .collect()
    }
}

pub fn tm_cmd(home: &TestHome) -> Command {
    let mut cmd = Command::cargo_bin("tm").expect("tm binary");
    cmd.env("TM_DATA_DIR", home.path());
    cmd.env_remove("TM_OFFLINE");
    cmd
}

/// Extract the created task id from `tm add --json` output
pub fn created_task_id(stdout: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(stdout).expect("parse add output");
    value["data"]["task"]["id"]
        .as_str()
        .expect("task id in output")
        .to_string()
}
