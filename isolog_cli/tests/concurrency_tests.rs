//! Concurrency tests for the isolog binary.
//!
//! Each invocation loads the full history, mutates it and rewrites the whole
//! snapshot. Sequential runs must never lose records; overlapping runs may
//! overwrite each other (last write wins) but must never leave a torn file.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn setup_test_dir() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[auth]\nlatency_ms = 0\n").expect("Failed to write config");
    (temp_dir, data_dir, config_path)
}

fn cli(data_dir: &Path, config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("isolog").expect("Failed to find isolog binary");
    cmd.arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(config_path);
    cmd
}

fn log_curl(data_dir: &Path, config_path: &Path, reps: usize) {
    cli(data_dir, config_path)
        .args(["log", "--gym", "Home", "--name", "Curl", "--weight", "30", "--reps"])
        .arg(reps.to_string())
        .assert()
        .success();
}

fn read_history(data_dir: &Path) -> Vec<serde_json::Value> {
    let contents =
        std::fs::read_to_string(data_dir.join("storage/workouts")).expect("Failed to read history");
    serde_json::from_str(&contents).expect("History snapshot is torn")
}

#[test]
fn test_sequential_logging_keeps_every_record() {
    let (_temp, data_dir, config) = setup_test_dir();
    cli(&data_dir, &config)
        .args(["login", "--email", "a@b.c", "--password", "pw"])
        .assert()
        .success();

    for reps in 1..=5 {
        log_curl(&data_dir, &config, reps);
    }

    let history = read_history(&data_dir);
    assert_eq!(history.len(), 5, "Expected 5 workouts, got {}", history.len());
}

#[test]
fn test_overlapping_writes_leave_valid_snapshot() {
    let (_temp, data_dir, config) = setup_test_dir();
    cli(&data_dir, &config)
        .args(["login", "--email", "a@b.c", "--password", "pw"])
        .assert()
        .success();

    let handles: Vec<_> = (1..=4)
        .map(|reps| {
            let data_dir = data_dir.clone();
            let config = config.clone();
            thread::spawn(move || log_curl(&data_dir, &config, reps))
        })
        .collect();

    for handle in handles {
        handle.join().expect("Writer thread panicked");
    }

    let history = read_history(&data_dir);
    assert!(
        (1..=4).contains(&history.len()),
        "Unexpected history size {}",
        history.len()
    );
}

#[test]
fn test_reads_during_writes() {
    let (_temp, data_dir, config) = setup_test_dir();
    cli(&data_dir, &config)
        .args(["login", "--email", "a@b.c", "--password", "pw"])
        .assert()
        .success();
    log_curl(&data_dir, &config, 8);

    let writer = {
        let data_dir = data_dir.clone();
        let config = config.clone();
        thread::spawn(move || {
            for reps in 1..=3 {
                log_curl(&data_dir, &config, reps);
            }
        })
    };

    for _ in 0..3 {
        cli(&data_dir, &config).arg("list").assert().success();
    }

    writer.join().expect("Writer thread panicked");
    assert_eq!(read_history(&data_dir).len(), 4);
}
