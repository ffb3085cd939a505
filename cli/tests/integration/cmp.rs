//! Integration tests for `fsx cmp`.

#[path = "../common/mod.rs"]
mod common;

use common::fsx;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case("a", "b", "-1")]
#[case("b", "a", "1")]
#[case("same", "same", "0")]
#[case("file10", "file2", "-1")]
#[case("", "a", "-1")]
#[case("日本", "日本", "0")]
fn test_cmp_order(#[case] a: &str, #[case] b: &str, #[case] expected: &str) {
    fsx()
        .args(["cmp", a, b])
        .assert()
        .success()
        .stdout(format!("{expected}\n"));
}

#[cfg(not(windows))]
#[test]
fn test_cmp_case_sensitive() {
    fsx().args(["cmp", "B", "a"]).assert().success().stdout("-1\n");
    fsx().args(["cmp", "A", "a"]).assert().success().stdout("-1\n");
}

#[cfg(windows)]
#[test]
fn test_cmp_case_insensitive() {
    fsx().args(["cmp", "B", "a"]).assert().success().stdout("1\n");
    fsx().args(["cmp", "A", "a"]).assert().success().stdout("0\n");
}

#[test]
fn test_cmp_json() {
    let output = fsx().args(["--json", "cmp", "x", "y"]).output().unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["order"], -1);
    assert_eq!(value["a"], "x");
}

#[test]
fn test_cmp_requires_two_names() {
    fsx().args(["cmp", "only"]).assert().code(2);
}
