#![cfg(feature = "cli")]

use std::fs;
use std::process::Command;

fn jsonb() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jsonb"))
}

#[test]
fn binarize_then_textify() {
    let dir = tempfile::tempdir().unwrap();
    let json_in = dir.path().join("in.json");
    let binary = dir.path().join("doc.jsonb");
    let json_out = dir.path().join("out.json");
    fs::write(&json_in, r#"{"key": 0.123, "list": [1, 300, "x"]}"#).unwrap();

    let status = jsonb().arg("-b").arg(&json_in).arg(&binary).status().unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&binary).unwrap()[0], 0);

    let status = jsonb().arg("-t").arg(&binary).arg(&json_out).status().unwrap();
    assert!(status.success());

    let printed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"key": 0.123, "list": [1, 300, "x"]})
    );
}

#[test]
fn malformed_invocation_prints_usage_and_exits_zero() {
    let output = jsonb().arg("-b").arg("only-one-path").output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {}", stderr);

    let output = jsonb().output().unwrap();
    assert!(output.status.success());
}

#[test]
fn bad_binary_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("bad.jsonb");
    fs::write(&binary, [14u8]).unwrap();

    let output = jsonb()
        .arg("-t")
        .arg(&binary)
        .arg(dir.path().join("out.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("unknown tag 14").count(),
        1,
        "stderr was: {}",
        stderr
    );
}

#[test]
fn lenient_ignores_trailing_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("trailing.jsonb");
    let json_out = dir.path().join("out.json");
    fs::write(&binary, [13u8, 13]).unwrap();

    let status = jsonb().arg("-t").arg(&binary).arg(&json_out).status().unwrap();
    assert!(!status.success());

    let status = jsonb()
        .arg("--lenient")
        .arg("-t")
        .arg(&binary)
        .arg(&json_out)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&json_out).unwrap(), "null\n");
}
