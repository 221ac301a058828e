//! Destination path resolution.
//!
//! A copy destination may name the target file itself or a directory to
//! copy into. Rather than `stat` the destination first, resolution simply
//! tries to open it as a file and falls back to `dir/<source file name>`
//! when the OS reports that it is a directory. This saves a syscall and
//! leaves no window between the check and the open.

use crate::copy::handles::{open_destination, try_open_destination};
use crate::error::{Error, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Path of `src`'s file name placed inside `dir`.
///
/// # Errors
///
/// Returns [`Error::NoFileName`] if `src` has no final component
/// (e.g. `/` or a path ending in `..`).
pub(crate) fn destination_in_dir(dir: &Path, src: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| Error::NoFileName(src.to_path_buf()))?;
    Ok(dir.join(name))
}

/// Open the destination for `src`, resolving directory destinations.
///
/// Returns the concrete destination path together with its open handle.
///
/// # Errors
///
/// Returns [`Error::Create`] for any open failure other than "is a
/// directory" on `dst` itself, or for failures opening the file inside
/// the directory, and [`Error::NoFileName`] if the directory fallback is
/// needed but `src` has no file name.
pub(crate) fn resolve_destination(src: &Path, dst: &Path) -> Result<(PathBuf, File)> {
    match try_open_destination(dst) {
        Ok(file) => Ok((dst.to_path_buf(), file)),
        Err(e) if is_directory_error(&e, dst) => {
            let inner = destination_in_dir(dst, src)?;
            let file = open_destination(&inner)?;
            Ok((inner, file))
        }
        Err(source) => Err(Error::Create {
            path: dst.to_path_buf(),
            source,
        }),
    }
}

/// Whether an open failure means the path is an existing directory.
#[cfg(not(windows))]
fn is_directory_error(error: &io::Error, _path: &Path) -> bool {
    error.kind() == io::ErrorKind::IsADirectory
}

/// Whether an open failure means the path is an existing directory.
///
/// Windows reports opening a directory for writing as access denied.
#[cfg(windows)]
fn is_directory_error(error: &io::Error, path: &Path) -> bool {
    match error.kind() {
        io::ErrorKind::IsADirectory => true,
        io::ErrorKind::PermissionDenied => path.is_dir(),
        _ => false,
    }
}
