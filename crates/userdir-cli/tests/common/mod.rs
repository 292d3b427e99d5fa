#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// An address nothing listens on, so an unexpected fetch fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1";

/// Smallest byte string the avatar check accepts as a PNG.
pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

/// Run the CLI binary against an isolated data directory and API.
pub fn run_cli_with_env(args: &[&str], data_dir: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_userdir"));
    cmd.args(args);
    cmd.env("HOME", data_dir);
    cmd.env("XDG_DATA_HOME", data_dir.join("xdg"));
    cmd.env("USERDIR_DATA_DIR", data_dir);
    cmd.env("USERDIR_API", api);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("USERDIR_QUERY");
    cmd.env_remove("USERDIR_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with no reachable API.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    run_cli_with_env(args, data_dir, UNREACHABLE_API)
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join("users.json")
}

/// Write a snapshot as if a previous run had stored it.
pub fn seed_snapshot(data_dir: &Path, records: serde_json::Value) {
    fs::create_dir_all(data_dir).unwrap();
    fs::write(snapshot_path(data_dir), records.to_string()).unwrap();
}

/// Read the stored snapshot, if any.
pub fn read_snapshot(data_dir: &Path) -> Option<serde_json::Value> {
    let content = fs::read_to_string(snapshot_path(data_dir)).ok()?;
    Some(serde_json::from_str(&content).unwrap())
}
