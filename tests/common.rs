#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rbh() -> Command {
    cargo_bin_cmd!("rubrohours")
}

/// Create a unique test data dir inside the system temp dir and remove any
/// existing content.
pub fn setup_data_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rubrohours_data", name));
    let dir = path.to_string_lossy().to_string();
    fs::remove_dir_all(&dir).ok();
    dir
}

/// Initialize the collections without touching the user's config file.
pub fn init(dir: &str) {
    rbh()
        .args(["--data-dir", dir, "--test", "init"])
        .assert()
        .success();
}

/// Add a worker and return nothing; asserts success.
pub fn add_worker(dir: &str, name: &str, email: &str, area: &str) {
    rbh()
        .args([
            "--data-dir",
            dir,
            "--test",
            "worker",
            "add",
            name,
            email,
            "--area",
            area,
        ])
        .assert()
        .success();
}

/// Add a rubro; asserts success.
pub fn add_rubro(dir: &str, name: &str) {
    rbh()
        .args(["--data-dir", dir, "--test", "rubro", "add", name])
        .assert()
        .success();
}

/// Assign hours for the current year; asserts success.
pub fn assign(dir: &str, worker_id: &str, rubro_id: &str, hours: &str) {
    rbh()
        .args([
            "--data-dir",
            dir,
            "--test",
            "hours",
            "assign",
            worker_id,
            rubro_id,
            hours,
        ])
        .assert()
        .success();
}
