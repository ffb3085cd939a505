//! Integration tests for `fsx sysattr`.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, fsx};
use serde_json::Value;

#[test]
fn test_sysattr_plain_file() {
    let fx = TestFixture::new();
    let file = fx.write_source("plain.txt", "x");

    fsx()
        .arg("sysattr")
        .arg(&file)
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_sysattr_missing_path() {
    let fx = TestFixture::new();

    fsx()
        .arg("sysattr")
        .arg(fx.src.path().join("missing.txt"))
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_sysattr_json() {
    let fx = TestFixture::new();

    let output = fsx()
        .args(["--json", "sysattr"])
        .arg(fx.src.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "sysattr");
    assert_eq!(value["system"], false);
}
