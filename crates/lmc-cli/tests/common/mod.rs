#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `lmc` command suitable for integration tests.
#[allow(dead_code)]
pub fn lmc_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lmc"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("LMC_CONFIG");
    cmd.env_remove("LMC_CONCURRENCY");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a publish snapshot with the given documents into `dir`.
#[allow(dead_code)]
pub fn write_snapshot(dir: &Path, documents: &serde_json::Value) -> PathBuf {
    let path = dir.join("publish.json");
    let snapshot = serde_json::json!({ "documents": documents });
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap())
        .expect("write snapshot");
    path
}

/// Read back a JSON file.
#[allow(dead_code)]
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&content).expect("parse json")
}
