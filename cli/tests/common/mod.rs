//! Common test utilities for integration tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Write `content` to `name` in the source directory and return its path.
    pub fn source_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.src.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Path of `name` inside the destination directory.
    pub fn dest_path(&self, name: &str) -> PathBuf {
        self.dst.path().join(name)
    }

    /// Check that `path` holds exactly `expected`.
    pub fn assert_file_bytes(&self, path: &Path, expected: &[u8]) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read(path).expect("Failed to read file");
        assert_eq!(actual.len(), expected.len(), "File size mismatch");
        assert!(actual == expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic non-repeating bytes, so misplaced ranges are detected.
pub fn pattern(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// An `rcopy` command isolated from the caller's environment defaults.
pub fn rcopy() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rcopy");
    cmd.env_remove("RANGECOPY_THREADS")
        .env_remove("RANGECOPY_BLOCK_SIZE")
        .env_remove("RUST_LOG");
    cmd
}

/// Check if we have root/admin privileges.
#[cfg(unix)]
pub fn has_root_privileges() -> bool {
    unsafe { libc::getuid() == 0 }
}

#[cfg(not(unix))]
pub fn has_root_privileges() -> bool {
    false
}
