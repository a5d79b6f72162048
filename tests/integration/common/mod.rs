#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

pub fn noir() -> Command {
    Command::new(env!("CARGO_BIN_EXE_noir"))
}

/// Write `source` to a temp dir next to a colorless `noir.toml` so rendered
/// diagnostics are plain text.
pub fn write_program(source: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("noir.toml"), "[diagnostics]\ncolor = false\n").unwrap();
    let src_path = dir.path().join("main.noir");
    std::fs::write(&src_path, source).unwrap();
    (dir, src_path)
}

pub fn invoke(subcommand: &str, source: &str) -> Output {
    let (_dir, src_path) = write_program(source);
    noir().arg(subcommand).arg(&src_path).output().unwrap()
}

/// Run through the binary and return stdout, asserting success.
pub fn run_stdout(source: &str) -> String {
    let output = invoke("run", source);
    assert!(
        output.status.success(),
        "Run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// In-process run, for tests that only care about program output.
pub fn run(source: &str) -> String {
    let out = noir::run_source(source, &noir::config::Config::default(), Vec::new())
        .unwrap_or_else(|errs| panic!("run failed: {errs:?}"));
    String::from_utf8(out).unwrap()
}

/// In-process run that must fail; returns every error message.
pub fn run_errors(source: &str) -> Vec<String> {
    match noir::run_source(source, &noir::config::Config::default(), Vec::new()) {
        Ok(out) => panic!("expected failure, got output {:?}", String::from_utf8_lossy(&out)),
        Err(errs) => errs.iter().map(|e| e.message().to_string()).collect(),
    }
}

pub fn run_should_fail_with(source: &str, expected_msg: &str) {
    let output = invoke("run", source);
    assert!(!output.status.success(), "Run should have failed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(expected_msg),
        "Expected error containing '{}', got: {}",
        expected_msg,
        stderr
    );
}
