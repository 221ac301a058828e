//! Error types for rangecopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during a copy job, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Phase | Errors |
//! |-------|--------|
//! | Setup (before any worker runs) | [`Error::Open`], [`Error::Create`], [`Error::Stat`], [`Error::Allocate`] |
//! | Validation | [`Error::IsADirectory`], [`Error::NoFileName`] |
//! | Workers | [`Error::Io`] |
//!
//! Setup errors abort the job before any byte is written. A worker error
//! leaves the destination at its final size with partially copied content.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for rangecopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use rangecopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// if is_no_space_error(&error) {
///     println!("Destination has no space!");
/// }
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw OS error might be available even if kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Check if an IO error is a transient condition that warrants an immediate
/// retry at the same offset (`EINTR` / `EAGAIN`).
#[inline]
pub fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}

/// The positioned operation that failed inside a copy worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Positioned read from the source
    Read,
    /// Positioned write to the destination
    Write,
}

impl IoOp {
    /// Stable lowercase name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable, machine-readable classification of an [`Error`].
///
/// Front ends use this to pick exit codes and to emit structured output
/// without matching on error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The source path does not exist
    SourceNotFound,
    /// The OS refused access to a path
    PermissionDenied,
    /// The source is a directory
    IsADirectory,
    /// The destination ran out of space
    NoSpace,
    /// Arguments could not be turned into a copy job
    InvalidInput,
    /// Any other IO failure
    IoError,
    /// Failure outside the copy itself (e.g. output serialization)
    Internal,
}

impl ErrorCode {
    /// Stable snake_case name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::IsADirectory => "is_a_directory",
            Self::NoSpace => "no_space",
            Self::InvalidInput => "invalid_input",
            Self::IoError => "io_error",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    ///
    /// A bare `NotFound` is an [`ErrorCode::IoError`]; only [`Error::code`]
    /// knows whether the missing path was the source.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::IsADirectory => Self::IsADirectory,
            _ => Self::IoError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during a copy job.
///
/// All errors include the path or offset involved to aid debugging.
/// Use the [`std::error::Error`] trait methods to access underlying
/// causes where applicable.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination could not be opened or created
    #[error("Failed to create {path}: {source}")]
    Create {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source metadata could not be read
    #[error("Failed to read metadata of {path}: {source}")]
    Stat {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination could not be sized to match the source
    #[error("Failed to size {path} to {len} bytes: {source}")]
    Allocate {
        /// Destination path
        path: PathBuf,
        /// Requested length in bytes
        len: u64,
        /// Underlying error
        source: io::Error,
    },

    /// A positioned read or write failed in a copy worker
    #[error("Positioned {op} failed at offset {offset}: {source}")]
    Io {
        /// Which side of the copy failed
        op: IoOp,
        /// Absolute file offset of the failed operation
        offset: u64,
        /// Underlying error
        source: io::Error,
    },

    /// Source is a directory, which cannot be copied as a byte range
    #[error("Source is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Destination is a directory but the source has no file name to place in it
    #[error("Source has no file name to copy into a directory: {0}")]
    NoFileName(PathBuf),
}

impl Error {
    /// Classify this error into a stable [`ErrorCode`].
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Open { source, .. } | Self::Stat { source, .. }
                if source.kind() == io::ErrorKind::NotFound =>
            {
                ErrorCode::SourceNotFound
            }
            Self::IsADirectory(_) => ErrorCode::IsADirectory,
            Self::NoFileName(_) => ErrorCode::InvalidInput,
            _ => self.io_error().map_or(ErrorCode::IoError, ErrorCode::from_io),
        }
    }

    /// The underlying IO error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Open { source, .. }
            | Self::Create { source, .. }
            | Self::Stat { source, .. }
            | Self::Allocate { source, .. }
            | Self::Io { source, .. } => Some(source),
            Self::IsADirectory(_) | Self::NoFileName(_) => None,
        }
    }
}
