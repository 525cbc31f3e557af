//! End-to-end tests for the `sift` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const SPEC: &str = r"
email:
  filters: [{name: string_trim}, {name: string_to_lower}]
  validators: [{name: email_address}]
age:
  required: false
  filters: [{name: to_int}]
  validators: [{name: between, options: {min: 18, max: 120}}]
phones:
  type: collection
  input_filter:
    number:
      validators: [{name: digits}]
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().expect("temp dir"),
        };
        ws.write("signup.yaml", SPEC);
        ws
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    fn sift(&self) -> Command {
        let mut cmd = Command::cargo_bin("sift").expect("sift binary");
        cmd.current_dir(self.dir.path())
            .env_remove("SIFT_LOG")
            .env_remove("RUST_LOG")
            .env_remove("SIFT_PRETTY")
            .env_remove("SIFT_REJECT_UNKNOWN");
        cmd
    }

    fn check(&self, data: &Value) -> Command {
        self.write("data.json", &data.to_string());
        let mut cmd = self.sift();
        cmd.args(["check", "--spec", "signup.yaml", "--data", "data.json"]);
        cmd
    }
}

fn report(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("report is JSON")
}

#[test]
fn valid_submission_exits_zero() {
    let ws = Workspace::new();
    let output = ws
        .check(&json!({"email": "  Ada@Example.com ", "age": "36", "phones": [{"number": "555"}]}))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        report(&output),
        json!({
            "valid": true,
            "values": {"email": "ada@example.com", "age": 36, "phones": [{"number": "555"}]},
            "raw_values": {"email": "  Ada@Example.com ", "age": "36", "phones": [{"number": "555"}]},
            "messages": {},
            "unknown": {}
        })
    );
}

#[test]
fn invalid_submission_exits_one() {
    let ws = Workspace::new();
    let output = ws
        .check(&json!({"email": "nope", "phones": [{"number": "555"}, {"number": "x"}]}))
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report = report(&output);
    assert_eq!(report["valid"], json!(false));
    assert!(report["messages"]["email"].is_object());
    assert!(report["messages"]["phones"]["1"]["number"]["notDigits"].is_string());
    assert!(report["messages"]["phones"].get("0").is_none());
}

#[test]
fn unknown_keys_are_listed() {
    let ws = Workspace::new();
    let output = ws
        .check(&json!({"email": "a@b.io", "phones": [], "extra": 1}))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(report(&output)["unknown"], json!({"extra": 1}));
}

#[test]
fn reject_unknown_flag_fails_the_check() {
    let ws = Workspace::new();
    ws.check(&json!({"email": "a@b.io", "phones": [], "extra": 1}))
        .arg("--reject-unknown")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"valid\":false"));
}

#[test]
fn reject_unknown_from_config_file() {
    let ws = Workspace::new();
    ws.write("sift.toml", "reject_unknown = true\n");

    ws.check(&json!({"email": "a@b.io", "phones": [], "extra": 1}))
        .assert()
        .code(1);
}

#[test]
fn pretty_from_environment() {
    let ws = Workspace::new();
    ws.check(&json!({"email": "a@b.io", "phones": []}))
        .env("SIFT_PRETTY", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"valid\": true"));
}

#[test]
fn non_object_data_is_a_usage_error() {
    let ws = Workspace::new();
    ws.check(&json!([1, 2]))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected object"));
}

#[test]
fn unknown_validator_is_a_usage_error() {
    let ws = Workspace::new();
    ws.write("bad.json", r#"{"x": {"validators": [{"name": "palindrome"}]}}"#);
    ws.write("data.json", "{}");

    ws.sift()
        .args(["check", "--spec", "bad.json", "--data", "data.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("palindrome"));
}

#[test]
fn missing_data_file_is_a_usage_error() {
    let ws = Workspace::new();
    ws.sift()
        .args(["check", "--spec", "signup.yaml", "--data", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read data"));
}

#[test]
fn missing_arguments_exit_two() {
    Workspace::new().sift().arg("check").assert().code(2);
}

#[test]
fn data_from_stdin() {
    let ws = Workspace::new();
    ws.sift()
        .args(["check", "--spec", "signup.yaml", "--data", "-"])
        .write_stdin(r#"{"email": "a@b.io", "phones": []}"#)
        .assert()
        .success();
}

#[test]
fn explain_prints_the_tree() {
    let ws = Workspace::new();
    ws.sift()
        .args(["explain", "--spec", "signup.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "email (input) [required, filters: string_trim > string_to_lower, validators: email_address]",
        ))
        .stdout(predicate::str::contains("phones (collection) [optional]"))
        .stdout(predicate::str::contains("  number (input) [required, validators: digits]"));
}
