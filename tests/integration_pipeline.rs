//! Integration tests for the pipeline module.
//!
//! These tests verify end-to-end pipeline behavior including:
//! - Duplicate content handling
//! - Timestamp precedence and offsets
//! - Name collisions in the output tree
//! - Configuration errors and output preparation

use assert_fs::prelude::*;
use chrono::{DateTime, Duration, Local};
use photo_organizer::core::pipeline::Pipeline;
use photo_organizer::error::{ConfigError, OrganizerError};
use photo_organizer::events::{Event, EventChannel, PipelineEvent};
use predicates::prelude::*;
use std::fs::{self, File};
use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};

fn pin_mtime(path: &std::path::Path, at: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(at)
        .unwrap();
}

#[test]
fn identical_content_is_copied_once() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input.child("a.jpg").write_binary(b"same bytes").unwrap();
    input.child("b.jpg").write_binary(b"same bytes").unwrap();

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    assert_eq!(report.input_files, 2);
    assert_eq!(report.duplicates_skipped(), 1);
    assert_eq!(report.files_copied(), 1);
    assert!(report.is_success());
    assert_eq!(report.extensions().get("jpg"), Some(&1));
}

#[test]
fn file_name_timestamp_wins_over_mtime_and_offset() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let photo = input.child("2023-05-01 10.30.00.jpg");
    photo.write_binary(b"photo").unwrap();
    pin_mtime(photo.path(), UNIX_EPOCH + StdDuration::from_secs(1_000_000_000));

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .time_offset_minutes(120)
        .build()
        .run()
        .unwrap();

    assert_eq!(report.resolve.from_file_name, 1);
    output
        .child("2023/2023_05May/2023-05-01_10-30-00.jpg")
        .assert(predicate::path::is_file());
    output
        .child("2023/2023_05May/2023-05-01_10-30-00.jpg")
        .assert("photo");
}

#[test]
fn month_directory_uses_english_month_name() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("2023-11-01 00.00.00.png")
        .write_binary(b"november")
        .unwrap();

    Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    output
        .child("2023/2023_11November/2023-11-01_00-00-00.png")
        .assert(predicate::path::exists());
}

#[test]
fn colliding_timestamps_get_numeric_suffixes() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("2023-05-01 10.30.00.jpg")
        .write_binary(b"first")
        .unwrap();
    input
        .child("x/2023-05-01 10.30.00.jpg")
        .write_binary(b"second")
        .unwrap();
    input
        .child("y/2023-05-01 10.30.00.jpg")
        .write_binary(b"third")
        .unwrap();

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    assert_eq!(report.files_copied(), 3);
    assert_eq!(report.placement.renamed_on_collision, 2);

    let month = output.child("2023/2023_05May");
    month.child("2023-05-01_10-30-00.jpg").assert("first");
    month.child("2023-05-01_10-30-00_1.jpg").assert("second");
    month.child("2023-05-01_10-30-00_2.jpg").assert("third");
}

#[test]
fn mtime_is_used_and_shifted_when_name_does_not_match() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let photo = input.child("IMG_0001.JPG");
    photo.write_binary(b"raw").unwrap();
    let mtime = UNIX_EPOCH + StdDuration::from_secs(1_600_000_000);
    pin_mtime(photo.path(), mtime);

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .time_offset_minutes(-45)
        .build()
        .run()
        .unwrap();

    assert_eq!(report.resolve.from_file_system, 1);

    let expected = DateTime::<Local>::from(mtime).naive_local() - Duration::minutes(45);
    let expected_path = format!(
        "{}/{}/{}.JPG",
        expected.format("%Y"),
        expected.format("%Y_%m%B"),
        expected.format("%Y-%m-%d_%H-%M-%S")
    );
    output.child(expected_path).assert("raw");
}

#[test]
fn device_profile_overrides_offset() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let photo = input.child("IMG_0002.jpg");
    photo.write_binary(b"nexus").unwrap();
    let mtime = UNIX_EPOCH + StdDuration::from_secs(1_500_000_000);
    pin_mtime(photo.path(), mtime);

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .time_offset_minutes(5)
        .device_profile(Some("nexus5x".to_string()))
        .build()
        .run()
        .unwrap();

    assert_eq!(report.resolve.profile_adjusted, 1);

    let expected = DateTime::<Local>::from(mtime).naive_local() + Duration::minutes(60);
    let expected_name = format!("{}.jpg", expected.format("%Y-%m-%d_%H-%M-%S"));
    let month = format!("{}/{}", expected.format("%Y"), expected.format("%Y_%m%B"));
    output.child(month).child(expected_name).assert("nexus");
}

#[test]
fn skip_duplicate_check_copies_identical_files() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("2020-01-01 12.00.00.jpg")
        .write_binary(b"dup")
        .unwrap();
    input
        .child("sub/2020-01-01 12.00.00.jpg")
        .write_binary(b"dup")
        .unwrap();

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .skip_duplicate_check(true)
        .build()
        .run()
        .unwrap();

    assert_eq!(report.duplicates_skipped(), 0);
    assert_eq!(report.files_copied(), 2);
    output
        .child("2020/2020_01January/2020-01-01_12-00-00_1.jpg")
        .assert(predicate::path::exists());
}

#[test]
fn missing_input_leaves_output_untouched() {
    let root = assert_fs::TempDir::new().unwrap();
    let output = root.child("output");
    output.child("keep.txt").write_str("keep").unwrap();

    let result = Pipeline::builder()
        .input(root.path().join("does-not-exist"))
        .output(output.path())
        .build()
        .run();

    assert!(matches!(
        result,
        Err(OrganizerError::Config(ConfigError::InputNotFound { .. }))
    ));
    output.child("keep.txt").assert("keep");
}

#[test]
fn existing_output_is_replaced() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input
        .child("2021-07-04 09.15.00.mp4")
        .write_binary(b"video")
        .unwrap();
    output.child("old/leftover.jpg").write_str("old").unwrap();

    Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    output.child("old").assert(predicate::path::missing());
    output
        .child("2021/2021_07July/2021-07-04_09-15-00.mp4")
        .assert("video");
}

#[test]
fn input_is_never_modified() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input.child("a.jpg").write_str("a").unwrap();
    input.child("b.jpg").write_str("a").unwrap();

    Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    input.child("a.jpg").assert("a");
    input.child("b.jpg").assert("a");
    assert_eq!(fs::read_dir(input.path()).unwrap().count(), 2);
}

#[test]
fn empty_input_produces_empty_report() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();

    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run()
        .unwrap();

    assert_eq!(report.input_files, 0);
    assert_eq!(report.files_copied(), 0);
    assert!(report.extensions().is_empty());
    output.assert(predicate::path::is_dir());
}

#[test]
fn pipeline_emits_started_and_completed() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    input.child("one.jpg").write_str("1").unwrap();

    let (sender, receiver) = EventChannel::new();
    let report = Pipeline::builder()
        .input(input.path())
        .output(output.path())
        .build()
        .run_with_events(&sender)
        .unwrap();
    drop(sender);

    let events: Vec<Event> = receiver.iter().collect();
    assert!(matches!(
        events.first(),
        Some(Event::Pipeline(PipelineEvent::Started))
    ));
    match events.last() {
        Some(Event::Pipeline(PipelineEvent::Completed { summary })) => {
            assert_eq!(summary.files_copied, report.files_copied());
            assert_eq!(summary.input_files, 1);
        }
        other => panic!("expected completion event, got {:?}", other),
    }
}

#[test]
fn existing_subdirectory_of_input_is_never_used_as_output() {
    let input = assert_fs::TempDir::new().unwrap();
    input.child("2019/x.jpg").write_str("keep me").unwrap();
    input.child("a.jpg").write_str("a").unwrap();

    let result = Pipeline::builder()
        .input(input.path())
        .output(input.child("2019").path())
        .build()
        .run();

    assert!(matches!(
        result,
        Err(OrganizerError::Config(ConfigError::OutputInsideInput { .. }))
    ));
    input.child("2019/x.jpg").assert("keep me");
}
