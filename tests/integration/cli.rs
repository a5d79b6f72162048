mod common;
use common::{invoke, noir, write_program};

#[test]
fn run_prints_program_output() {
    let output = invoke("run", "print(\"hello, noir\")\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello, noir\n");
}

#[test]
fn check_accepts_valid_program() {
    let output = invoke("check", "x: Int = 1\nprint(x)\n");
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "check must not execute the program");
    assert!(String::from_utf8_lossy(&output.stderr).contains("ok"));
}

#[test]
fn check_does_not_report_runtime_errors() {
    let output = invoke("check", "print(1 / 0)\n");
    assert!(output.status.success());
}

#[test]
fn tokens_lists_kinds_with_positions() {
    let output = invoke("tokens", "x: Int = 42\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1:1 IDENTIFIER \"x\"",
            "1:2 COLON \":\"",
            "1:4 TYPE \"Int\"",
            "1:8 ASSIGN \"=\"",
            "1:10 INTEGER_LIT \"42\"",
            "1:12 NEWLINE \"\\n\"",
            "2:1 EOF \"\"",
        ]
    );
}

#[test]
fn ast_prints_tree() {
    let output = invoke("ast", "x: Int = 1 + 2\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("VARIABLE_DECLARATION\n  IDENTIFIER(x)\n"), "{stdout}");
    assert!(stdout.contains("PLUS"), "{stdout}");
}

#[test]
fn ast_json_is_valid_json() {
    let (_dir, path) = write_program("print(1)\n");
    let output = noir().arg("ast").arg("--json").arg(&path).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stmts"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = noir().arg("run").arg(dir.path().join("absent.noir")).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read file"));
}

#[test]
fn explicit_config_flag() {
    let (dir, path) = write_program("func down(n: Int):\n  down(n + 1)\n::\ndown(0)\n");
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[interpreter]\nmax_call_depth = 4\n[diagnostics]\ncolor = false\n").unwrap();
    let output = noir().arg("--config").arg(&config).arg("run").arg(&path).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("maximum call depth of 4 exceeded"));
}

#[test]
fn invalid_config_is_reported() {
    let (dir, path) = write_program("print(1)\n");
    std::fs::write(dir.path().join("noir.toml"), "[interpreter]\nunknown = 1\n").unwrap();
    let output = noir().arg("run").arg(&path).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config error"), "{stderr}");
    assert!(output.stdout.is_empty());
}
