//! Integration tests for `fsx cp`.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, fsx};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

#[test]
fn test_basic_file_copy() {
    let fx = TestFixture::new();
    let src = fx.write_source("test.txt", "hello world");
    let dst = fx.dst.path().join("test.txt");

    fsx()
        .arg("cp")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("test.txt"));

    fx.assert_file_content(&dst, b"hello world");
}

#[test]
fn test_copy_into_directory() {
    let fx = TestFixture::new();
    let src = fx.write_source("report.pdf", "pdf bytes");

    fsx()
        .arg("cp")
        .arg(&src)
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("report.pdf"));

    fx.assert_file_content(&fx.dst.path().join("report.pdf"), b"pdf bytes");
}

#[test]
fn test_copy_small_chunks() {
    let fx = TestFixture::new();
    let data = TestFixture::payload(100_000);
    let src = fx.write_source("data.bin", &data);
    let dst = fx.dst.path().join("data.bin");

    fsx()
        .args(["cp", "--quiet", "--chunk-size", "4096"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_file_content(&dst, &data);
}

#[test]
fn test_copy_creates_parent_directories() {
    let fx = TestFixture::new();
    let src = fx.write_source("a.txt", "nested");
    let dst = fx.dst.path().join("x").join("y").join("a.txt");

    fsx().arg("cp").arg(&src).arg(&dst).assert().success();

    fx.assert_file_content(&dst, b"nested");
}

#[test]
fn test_copy_missing_source() {
    let fx = TestFixture::new();
    let dst = fx.dst.path().join("out.txt");

    fsx()
        .arg("cp")
        .arg(fx.src.path().join("does_not_exist.txt"))
        .arg(&dst)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("source_not_found"));

    assert!(!dst.exists());
}

#[test]
fn test_copy_onto_itself() {
    let fx = TestFixture::new();
    let src = fx.write_source("same.txt", "keep me");

    fsx()
        .arg("cp")
        .arg(&src)
        .arg(&src)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("same_file"));

    fx.assert_file_content(&src, b"keep me");
}

#[test]
fn test_copy_rejects_zero_chunk_size() {
    let fx = TestFixture::new();
    let src = fx.write_source("a.txt", "x");

    fsx()
        .args(["cp", "--chunk-size", "0"])
        .arg(&src)
        .arg(fx.dst.path())
        .assert()
        .code(2);

    assert!(!fx.dst.path().join("a.txt").exists());
}

#[test]
fn test_copy_json_output() {
    let fx = TestFixture::new();
    let src = fx.write_source("data.txt", "0123456789");

    let output = fsx()
        .args(["--json", "cp"])
        .arg(&src)
        .arg(fx.dst.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "cp");
    assert_eq!(value["status"], "copied");
    assert_eq!(value["bytes"], 10);
    assert!(
        value["destination"]
            .as_str()
            .unwrap()
            .ends_with("data.txt")
    );
}

#[test]
fn test_copy_json_error() {
    let fx = TestFixture::new();

    let output = fsx()
        .args(["cp", "--json"])
        .arg(fx.src.path().join("missing.bin"))
        .arg(fx.dst.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["error_code"], "source_not_found");
}

#[test]
fn test_copy_preserves_modification_time() {
    let fx = TestFixture::new();
    let src = fx.write_source("old.txt", "old content");
    let dst = fx.dst.path().join("old.txt");

    fsx()
        .args(["touch", "--modified", "1500000000"])
        .arg(&src)
        .assert()
        .success();

    fsx().arg("cp").arg(&src).arg(&dst).assert().success();

    let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(&dst).unwrap().modified().unwrap();
    assert_eq!(src_mtime, dst_mtime);
}

#[test]
fn test_copy_no_times() {
    let fx = TestFixture::new();
    let src = fx.write_source("old.txt", "old content");
    let dst = fx.dst.path().join("old.txt");

    fsx()
        .args(["touch", "--modified", "1500000000"])
        .arg(&src)
        .assert()
        .success();

    fsx()
        .args(["cp", "--no-times", "--no-sync"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(&dst).unwrap().modified().unwrap();
    assert!(dst_mtime > src_mtime);
}

#[cfg(unix)]
#[test]
fn test_copy_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let fx = TestFixture::new();
    let src = fx.write_source("run.sh", "#!/bin/sh\n");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o754)).unwrap();
    let dst = fx.dst.path().join("run.sh");

    fsx().arg("cp").arg(&src).arg(&dst).assert().success();

    let mode = fs::metadata(&dst).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o754);
}
