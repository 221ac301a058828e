//! Opening, sizing and releasing the two files of a copy job.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Open the source read-only.
pub(crate) fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Open the destination for writing, creating it if missing.
///
/// Existing content is not truncated here; [`preallocate`] sets the final
/// length afterwards. The raw `io::Error` is returned so the path resolver
/// can recognise `EISDIR` and retry inside the directory.
pub(crate) fn try_open_destination(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o755);
    }

    options.open(path)
}

/// [`try_open_destination`] with the error wrapped as [`Error::Create`].
pub(crate) fn open_destination(path: &Path) -> Result<File> {
    try_open_destination(path).map_err(|source| Error::Create {
        path: path.to_path_buf(),
        source,
    })
}

/// Size in bytes of an open source file.
///
/// # Errors
///
/// Returns [`Error::Stat`] if the metadata query fails, and
/// [`Error::IsADirectory`] if the handle refers to a directory (which
/// `open(2)` happily returns read-only).
pub(crate) fn file_size(file: &File, path: &Path) -> Result<u64> {
    let meta = file.metadata().map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if meta.is_dir() {
        return Err(Error::IsADirectory(path.to_path_buf()));
    }

    Ok(meta.len())
}

/// Set the destination's length to exactly `len` bytes.
///
/// After this returns every worker writes strictly inside the file, so no
/// write ever needs to extend it.
pub(crate) fn preallocate(file: &File, path: &Path, len: u64) -> Result<()> {
    file.set_len(len).map_err(|source| Error::Allocate {
        path: path.to_path_buf(),
        len,
        source,
    })
}

/// Both files of one copy job.
///
/// Owning them together means both are closed exactly once, when the job
/// value goes out of scope, whichever step failed.
#[derive(Debug)]
pub(crate) struct JobFiles {
    pub src: File,
    pub dst: File,
    pub dst_path: PathBuf,
}

impl JobFiles {
    /// Size the destination to `len` bytes.
    pub(crate) fn preallocate(&self, len: u64) -> Result<()> {
        preallocate(&self.dst, &self.dst_path, len)
    }
}
