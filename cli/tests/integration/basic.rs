//! Basic functionality integration tests for rcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, pattern, rcopy};
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

#[test]
fn test_basic_file_copy() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", b"hello world");
    let dst = fx.dest_path("test.txt");

    rcopy()
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied"));

    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
}

#[test]
fn test_copy_into_directory() {
    let fx = TestFixture::new();
    let src = fx.source_file("report.csv", b"a,b,c\n1,2,3\n");

    rcopy().arg(&src).arg(fx.dst.path()).assert().success();

    fx.assert_file_bytes(&fx.dest_path("report.csv"), b"a,b,c\n1,2,3\n");
}

#[test]
fn test_end_to_end_four_workers() {
    let fx = TestFixture::new();
    let content = pattern(10_000);
    let src = fx.source_file("random.bin", &content);
    let dst = fx.dest_path("random.bin");

    rcopy()
        .args(["-j", "4", "-b", "1024"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    assert_eq!(fs::metadata(&dst).unwrap().len(), 10_000);
    fx.assert_file_bytes(&dst, &content);
}

#[rstest]
#[case::empty(0)]
#[case::one_byte(1)]
#[case::odd_size(7 * 1024 + 3)]
fn test_copy_sizes(#[case] size: usize, #[values("1", "3", "16")] jobs: &str) {
    let fx = TestFixture::new();
    let content = pattern(size);
    let src = fx.source_file("data.bin", &content);
    let dst = fx.dest_path("data.bin");

    rcopy()
        .args(["-j", jobs, "-b", "1K"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_file_bytes(&dst, &content);
}

#[test]
fn test_overwrite_larger_destination() {
    let fx = TestFixture::new();
    let src = fx.source_file("small.txt", b"new");
    let dst = fx.dest_path("small.txt");
    fs::write(&dst, "much older and longer content").unwrap();

    rcopy().arg(&src).arg(&dst).assert().success();

    assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
}

#[test]
fn test_json_output() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.bin", &pattern(5000));
    let dst = fx.dest_path("data.bin");

    let output = rcopy()
        .args(["--output", "json", "-j", "3", "-b", "2K"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["schema_version"], "1.0");
    assert_eq!(value["source"], src.display().to_string());
    assert_eq!(value["destination"], dst.display().to_string());
    assert_eq!(value["bytes_copied"], 5000);
    assert_eq!(value["workers"], 3);
    assert_eq!(value["block_size"], 2048);
    assert!(value["duration_ms"].is_u64());
}

#[test]
fn test_environment_defaults() {
    let fx = TestFixture::new();
    let src = fx.source_file("env.bin", &pattern(3000));
    let dst = fx.dest_path("env.bin");

    let output = rcopy()
        .env("RANGECOPY_THREADS", "5")
        .env("RANGECOPY_BLOCK_SIZE", "512")
        .args(["--output", "json"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["workers"], 5);
    assert_eq!(value["block_size"], 512);
}

#[test]
fn test_flags_override_environment() {
    let fx = TestFixture::new();
    let src = fx.source_file("flags.bin", &pattern(3000));
    let dst = fx.dest_path("flags.bin");

    let output = rcopy()
        .env("RANGECOPY_THREADS", "5")
        .env("RANGECOPY_BLOCK_SIZE", "512")
        .args(["--output", "json", "-j", "2", "-b", "1024"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["workers"], 2);
    assert_eq!(value["block_size"], 1024);
}

#[test]
fn test_invalid_environment_value_is_ignored() {
    let fx = TestFixture::new();
    let src = fx.source_file("bad_env.bin", b"still copied");
    let dst = fx.dest_path("bad_env.bin");

    rcopy()
        .env("RANGECOPY_THREADS", "many")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stderr(predicate::str::contains("RANGECOPY_THREADS"));

    assert_eq!(fs::read_to_string(&dst).unwrap(), "still copied");
}

#[test]
fn test_quiet_prints_nothing() {
    let fx = TestFixture::new();
    let src = fx.source_file("quiet.txt", b"shh");

    rcopy()
        .arg("-q")
        .arg(&src)
        .arg(fx.dest_path("quiet.txt"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_breakdown() {
    let fx = TestFixture::new();
    let src = fx.source_file("verbose.bin", &pattern(4096));

    rcopy()
        .args(["-v", "-j", "4"])
        .arg(&src)
        .arg(fx.dest_path("verbose.bin"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Workers:        4\n")
                .and(predicate::str::contains("Block size:     4.00 MB")),
        );
}

#[test]
fn test_version() {
    rcopy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
