//! Integration tests for `fsx label`.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, fsx};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_label_prints_one_line() {
    let fx = TestFixture::new();

    fsx()
        .arg("label")
        .arg(fx.src.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[^\n]*\n$").unwrap());
}

#[test]
fn test_label_same_for_missing_child() {
    let fx = TestFixture::new();

    let parent = fsx().arg("label").arg(fx.src.path()).output().unwrap();
    let child = fsx()
        .arg("label")
        .arg(fx.src.path().join("not_created_yet.txt"))
        .output()
        .unwrap();

    assert!(parent.status.success());
    assert!(child.status.success());
    assert_eq!(parent.stdout, child.stdout);
}

#[test]
fn test_label_json() {
    let fx = TestFixture::new();

    let output = fsx()
        .args(["label", "--json"])
        .arg(fx.src.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "label");
    // Windows drives may carry an empty label
    let label = value["label"].as_str().unwrap();
    assert_eq!(value["known"], label != "???");
}
