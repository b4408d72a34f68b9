//! Integration tests for the `photo-organize` binary.

use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::{Command, Output};

fn photo_organize(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_photo-organize"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn organize_prints_json_report() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("2022-02-02 02.02.02.heic")
        .write_binary(b"one")
        .unwrap();
    input.child("copy.heic").write_binary(b"one").unwrap();

    let result = photo_organize(&[
        "organize",
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(result.status.success());
    let report: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(report["input_files"], 2);
    assert_eq!(report["dedup"]["duplicates_skipped"], 1);
    assert_eq!(report["placement"]["files_copied"], 1);
    output
        .child("2022/2022_02February/2022-02-02_02-02-02.heic")
        .assert(predicate::path::exists());
}

#[test]
fn organize_pretty_prints_statistics_table() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input.child("a.jpg").write_str("a").unwrap();

    let result = photo_organize(&[
        "organize",
        input.path().to_str().unwrap(),
        "--output",
        output.path().to_str().unwrap(),
    ]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(predicate::str::contains("Statistics").eval(&stdout));
    assert!(predicate::str::contains("Files copied").eval(&stdout));
}

#[test]
fn missing_input_exits_with_error_and_touches_nothing() {
    let root = assert_fs::TempDir::new().unwrap();
    let output = root.child("out");

    let result = photo_organize(&[
        "organize",
        root.child("nope").path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(predicate::str::contains("Input directory not found").eval(&stderr));
    output.assert(predicate::path::missing());
}

#[test]
fn malformed_arguments_exit_non_zero() {
    let result = photo_organize(&["organize", "--time-offset", "soon"]);
    assert!(!result.status.success());
}

#[test]
fn profiles_lists_the_table() {
    let result = photo_organize(&["profiles"]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(predicate::str::contains("nexus5x").eval(&stdout));
    assert!(predicate::str::contains("canon-s120").eval(&stdout));
}

#[test]
fn nested_existing_output_is_refused() {
    let input = assert_fs::TempDir::new().unwrap();
    input.child("2019/x.jpg").write_str("keep me").unwrap();

    let result = photo_organize(&[
        "organize",
        input.path().to_str().unwrap(),
        "-o",
        input.child("2019").path().to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    input.child("2019/x.jpg").assert("keep me");
}
