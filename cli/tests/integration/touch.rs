//! Integration tests for `fsx touch`.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, fsx};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::time::{Duration, UNIX_EPOCH};

#[test]
fn test_touch_modified_unix_seconds() {
    let fx = TestFixture::new();
    let file = fx.write_source("a.txt", "x");

    fsx()
        .args(["touch", "--modified", "1700000000"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let mtime = fs::metadata(&file).unwrap().modified().unwrap();
    assert_eq!(mtime, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
}

#[test]
fn test_touch_modified_rfc3339() {
    let fx = TestFixture::new();
    let file = fx.write_source("a.txt", "x");

    fsx()
        .args(["touch", "--modified", "2023-11-14T22:13:20Z"])
        .arg(&file)
        .assert()
        .success();

    let mtime = fs::metadata(&file).unwrap().modified().unwrap();
    assert_eq!(mtime, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
}

#[test]
fn test_touch_accessed_keeps_modified() {
    let fx = TestFixture::new();
    let file = fx.write_source("a.txt", "x");

    fsx()
        .args(["touch", "--modified", "1600000000"])
        .arg(&file)
        .assert()
        .success();
    fsx()
        .args(["touch", "--accessed", "1650000000"])
        .arg(&file)
        .assert()
        .success();

    let meta = fs::metadata(&file).unwrap();
    assert_eq!(
        meta.modified().unwrap(),
        UNIX_EPOCH + Duration::from_secs(1_600_000_000)
    );
    assert_eq!(
        meta.accessed().unwrap(),
        UNIX_EPOCH + Duration::from_secs(1_650_000_000)
    );
}

#[test]
fn test_touch_json_lists_applied_fields() {
    let fx = TestFixture::new();
    let file = fx.write_source("a.txt", "x");

    let output = fsx()
        .args(["--json", "touch", "--modified", "1700000000", "--accessed", "1700000000"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "touch");
    assert_eq!(value["applied"], serde_json::json!(["modified", "accessed"]));
}

#[test]
fn test_touch_without_times_is_noop() {
    let fx = TestFixture::new();

    // Nothing requested, so even a missing file is fine
    fsx()
        .arg("touch")
        .arg(fx.src.path().join("missing.txt"))
        .assert()
        .success();
}

#[test]
fn test_touch_missing_file() {
    let fx = TestFixture::new();

    fsx()
        .args(["touch", "--modified", "1700000000"])
        .arg(fx.src.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("io_error"));
}

#[test]
fn test_touch_rejects_bad_time() {
    let fx = TestFixture::new();
    let file = fx.write_source("a.txt", "x");

    fsx()
        .args(["touch", "--modified", "last tuesday"])
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RFC 3339"));
}
