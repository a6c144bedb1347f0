// CLI integration tests for the jsonview binary.
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_jsonview");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn stdout_json(output: &Output) -> Value {
    parse_json(std::str::from_utf8(&output.stdout).expect("utf8").trim())
}

fn stderr_json(output: &Output) -> Value {
    let text = String::from_utf8_lossy(&output.stderr);
    let line = text.lines().last().expect("json line");
    parse_json(line)
}

fn write_doc(dir: &tempfile::TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write doc");
    path.to_str().expect("utf8 path").to_string()
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

const DOC: &str = r#"{"user":{"id":1,"name":"Alice","joined":"2026-02-01T00:00:00Z"},"tags":["dart","qt","json"],"score":3.14159}"#;

#[test]
fn show_coerces_primitives_from_a_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_doc(&temp, "doc.json", DOC);

    let id = cmd()
        .args(["--input", &input, "show", "user", "id", "--as", "int"])
        .output()
        .expect("show id");
    assert!(id.status.success());
    assert_eq!(stdout_json(&id), Value::from(1));

    let tag = cmd()
        .args(["--input", &input, "show", "tags", "0", "--as", "text"])
        .output()
        .expect("show tag");
    assert!(tag.status.success());
    assert_eq!(stdout_json(&tag), Value::from("dart"));

    let rounded = cmd()
        .args(["--input", &input, "show", "score", "--as", "rounded", "--digits", "2"])
        .output()
        .expect("show score");
    assert_eq!(stdout_json(&rounded), Value::from("3.14"));

    let joined = cmd()
        .args(["--input", &input, "show", "user", "joined", "--as", "date"])
        .output()
        .expect("show joined");
    assert_eq!(stdout_json(&joined), Value::from("2026-02-01T00:00:00Z"));
}

#[test]
fn show_without_coercion_prints_subtree_compact_when_piped() {
    let output = run_with_stdin(&["show", "user"], DOC);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        text.trim(),
        r#"{"id":1,"name":"Alice","joined":"2026-02-01T00:00:00Z"}"#
    );
}

#[test]
fn keys_and_len() {
    let keys = run_with_stdin(&["keys"], DOC);
    assert!(keys.status.success());
    assert_eq!(
        stdout_json(&keys),
        serde_json::json!(["user", "tags", "score"])
    );

    let len = run_with_stdin(&["len", "tags"], DOC);
    assert_eq!(stdout_json(&len), Value::from(3));

    let check = run_with_stdin(&["check"], "[1,2]");
    let summary = stdout_json(&check);
    assert_eq!(summary["shape"], "array");
    assert_eq!(summary["len"], 2);
}

#[test]
fn wrong_shape_reports_json_error_and_exit_code() {
    let output = run_with_stdin(&["show", "tags", "--as", "text"], DOC);
    assert_eq!(output.status.code().unwrap(), 5);
    let err = stderr_json(&output);
    assert_eq!(err["error"]["kind"], "WrongShape");
    assert_eq!(err["error"]["key"], "tags");
    assert_eq!(err["error"]["actual"], "array");
    assert!(
        err["error"]["message"]
            .as_str()
            .unwrap()
            .contains("get_list(\"tags\")")
    );
}

#[test]
fn index_range_and_format_exit_codes() {
    let range = run_with_stdin(&["show", "tags", "7"], DOC);
    assert_eq!(range.status.code().unwrap(), 6);
    let err = stderr_json(&range);
    assert_eq!(err["error"]["kind"], "IndexRange");
    assert_eq!(err["error"]["index"], 7);
    assert_eq!(err["error"]["length"], 3);

    let format = run_with_stdin(&["check"], "not json");
    assert_eq!(format.status.code().unwrap(), 4);
    assert_eq!(stderr_json(&format)["error"]["kind"], "Format");
}

#[test]
fn usage_and_io_exit_codes() {
    let usage = run_with_stdin(&["show", "tags", "first"], DOC);
    assert_eq!(usage.status.code().unwrap(), 2);

    let digits = run_with_stdin(
        &["show", "score", "--as", "rounded", "--digits", "70000"],
        DOC,
    );
    assert_eq!(digits.status.code().unwrap(), 2);
    assert_eq!(stderr_json(&digits)["error"]["kind"], "Usage");

    let primitive = run_with_stdin(&["show", "tags", "0", "1"], DOC);
    assert_eq!(primitive.status.code().unwrap(), 5);
    let err = stderr_json(&primitive);
    assert_eq!(err["error"]["kind"], "WrongShape");
    assert!(err["error"].get("key").is_none());

    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing.json");
    let io = cmd()
        .args(["--input", missing.to_str().unwrap(), "check"])
        .output()
        .expect("check");
    assert_eq!(io.status.code().unwrap(), 8);
    let err = stderr_json(&io);
    assert_eq!(err["error"]["kind"], "Io");
    assert!(err["error"]["path"].as_str().unwrap().ends_with("missing.json"));
}
