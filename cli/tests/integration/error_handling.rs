//! Error handling integration tests for rcopy CLI.
//!
//! These tests verify error codes, exit codes and messages:
//! - Source validation
//! - Destination validation
//! - Invalid arguments
//! - Permission errors

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, has_root_privileges, rcopy};
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

#[test]
fn test_source_not_found() {
    let fx = TestFixture::new();
    let dst = fx.dest_path("out.bin");

    rcopy()
        .arg(fx.src.path().join("missing.bin"))
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[source_not_found]"));

    // Nothing is created when the source cannot be opened
    assert!(!dst.exists());
}

#[cfg(unix)]
#[test]
fn test_source_is_directory() {
    let fx = TestFixture::new();
    let src = fx.src.path().join("mydir");
    fs::create_dir(&src).unwrap();

    rcopy()
        .arg(&src)
        .arg(fx.dest_path("mydir"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[is_a_directory]"));
}

/// Copying to a path whose parent directory doesn't exist fails without
/// creating the parent, like `cp`.
#[test]
fn test_copy_to_nonexistent_parent_directory() {
    let fx = TestFixture::new();
    let src = fx.source_file("file.txt", b"content");
    let dst = fx.dst.path().join("nonexistent/path/file.txt");

    rcopy()
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("error[io_error]")
                .and(predicate::str::contains("source_not_found").not()),
        );

    assert!(!fx.dst.path().join("nonexistent").exists());
}

#[rstest]
#[case::zero("0")]
#[case::garbage("lots")]
#[case::bad_suffix("4X")]
#[case::negative("-1")]
fn test_invalid_block_size(#[case] value: &str) {
    let fx = TestFixture::new();
    let src = fx.source_file("file.txt", b"content");
    let dst = fx.dest_path("file.txt");

    rcopy()
        .arg(format!("--block-size={value}"))
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_input]"));

    assert!(!dst.exists());
}

#[test]
fn test_zero_jobs() {
    let fx = TestFixture::new();
    let src = fx.source_file("file.txt", b"content");

    rcopy()
        .args(["-j", "0"])
        .arg(&src)
        .arg(fx.dest_path("file.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_missing_destination_argument() {
    let fx = TestFixture::new();
    let src = fx.source_file("file.txt", b"content");

    rcopy().arg(&src).assert().failure();
}

#[test]
fn test_json_failure_output() {
    let fx = TestFixture::new();

    let output = rcopy()
        .args(["--output", "json"])
        .arg(fx.src.path().join("missing.bin"))
        .arg(fx.dest_path("out.bin"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["schema_version"], "1.0");
    assert_eq!(value["error_code"], "source_not_found");
    assert!(
        value["error_message"]
            .as_str()
            .unwrap()
            .contains("missing.bin")
    );
}

/// Test permission denied error handling (Unix only).
#[cfg(unix)]
#[test]
fn test_permission_denied_destination() {
    use std::os::unix::fs::PermissionsExt;

    if has_root_privileges() {
        eprintln!("SKIP: root ignores directory permissions");
        return;
    }

    let fx = TestFixture::new();
    let src = fx.source_file("file.txt", b"content");

    // Make destination directory read-only
    fs::set_permissions(fx.dst.path(), fs::Permissions::from_mode(0o555)).unwrap();

    let result = rcopy().arg(&src).arg(fx.dst.path()).assert();

    result
        .code(1)
        .stderr(predicate::str::contains("error[permission_denied]"));

    // Cleanup: restore permissions so TempDir can be deleted
    fs::set_permissions(fx.dst.path(), fs::Permissions::from_mode(0o755)).ok();
}
