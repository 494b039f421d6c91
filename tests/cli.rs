//! Runs the `stamplog` binary to check behavior only a real process shows.

use std::io::Write;
use std::process::{Command, Stdio};

fn stamplog() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stamplog"))
}

fn header_width(line: &str) -> usize {
    line.char_indices()
        .filter(|(_, c)| *c == ' ')
        .nth(3)
        .map(|(ix, _)| ix + 1)
        .unwrap()
}

#[test]
fn fatal_writes_then_exits_nonzero_even_when_silenced() {
    let output = stamplog()
        .args(["--threshold", "none", "fatal", "cannot continue"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.ends_with(" F cannot continue\n"), "stderr: {stderr:?}");
}

#[test]
fn info_record_goes_to_stderr_by_default() {
    let output = stamplog().args(["info", "hello"]).output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.ends_with(" I hello\n"));
}

#[test]
fn filtered_record_writes_nothing() {
    let output = stamplog().args(["debug", "hidden"]).output().unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn parts_become_aligned_continuation_lines() {
    let output = stamplog()
        .args(["--output", "stdout", "warn", "first", "second\nthird"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    let width = header_width(lines[0]);
    assert!(lines[0].ends_with(" W first"));
    assert_eq!(lines[1], format!("{}second", " ".repeat(width)));
    assert_eq!(lines[2], format!("{}third", " ".repeat(width)));
}

#[test]
fn stdin_is_read_when_no_parts_given() {
    let mut child = stamplog()
        .args(["--output", "stdout", "error"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"from stdin\n\nsecond line\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" E from stdin"));
    assert_eq!(lines[1].trim_start(), "second line");
}

#[test]
fn config_file_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("out.log");
    let config_path = dir.path().join("stamplog.json");
    let config = serde_json::json!({ "level": "verbose", "output": log_path });
    std::fs::write(&config_path, config.to_string()).unwrap();

    let status = stamplog()
        .arg("--config")
        .arg(&config_path)
        .args(["verbose", "into the file"])
        .status()
        .unwrap();
    assert!(status.success());

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.ends_with(" V into the file\n"));
}

#[test]
fn unknown_level_is_a_usage_error() {
    let output = stamplog().args(["loud", "x"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown log level 'loud'"));
}
