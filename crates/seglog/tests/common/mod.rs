//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Four-row telemetry log; rows 1 and 2 satisfy `state >= 1 && acc_x > 20`.
pub const TELEMETRY: &str = "t\tstate\tacc_x\n0\t0\t5\n1\t1\t25\n2\t1\t30\n3\t0\t5\n";

/// Path of the seglog binary built for this test run
pub fn seglog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_seglog"))
}

/// Run the seglog binary directly in the specified directory
pub fn run_seglog_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(seglog_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute seglog binary")
}

/// Write `contents` to `dir/name` and return the path
pub fn write_log(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write log file");
    path
}

/// Sorted file names directly inside `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
