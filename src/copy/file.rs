//! Single file copy jobs.
//!
//! A job resolves and opens both files, sizes the destination to match the
//! source, splits the byte span between workers and waits for all of them.

use crate::error::Result;
use crate::options::CopyOptions;
use crate::utils::path::resolve_destination;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::dispatch::dispatch;
use super::handles::{JobFiles, file_size, open_source};
use super::range::partition;

/// Statistics from a completed copy job.
///
/// # Example
///
/// ```no_run
/// use rangecopy::{copy_file, CopyOptions};
/// use std::path::Path;
///
/// let stats = copy_file(Path::new("disk.img"), Path::new("/backup"), &CopyOptions::default())?;
/// println!("{} bytes -> {}", stats.bytes_copied, stats.destination.display());
/// # Ok::<(), rangecopy::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyStats {
    /// Concrete destination file (inside the destination directory, if one was given)
    pub destination: PathBuf,
    /// Total bytes copied, equal to the source size
    pub bytes_copied: u64,
    /// Number of workers the file was split between
    pub workers: usize,
    /// Block size used by each worker
    pub block_size: usize,
    /// Wall-clock duration of the job
    pub duration: Duration,
}

impl CopyStats {
    /// Average throughput in bytes per second, if any time elapsed.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.duration.as_secs_f64();
        (secs > 0.0).then(|| self.bytes_copied as f64 / secs)
    }
}

/// Copy one file using `options.workers` concurrent range copies.
///
/// If `dst` is an existing directory the file is copied to
/// `dst/<file name of src>`. An existing destination file is overwritten
/// in place and resized to the source length.
///
/// The destination is sized before any worker starts, so workers only
/// ever write inside the file. Both files are closed before this returns,
/// on success and on every error path.
///
/// # Arguments
///
/// * `src` - Source file path
/// * `dst` - Destination file or directory path
/// * `options` - Worker count and block size
///
/// # Errors
///
/// Returns an error if:
/// - Source cannot be opened ([`Error::Open`](crate::Error::Open))
/// - Destination cannot be opened or created ([`Error::Create`](crate::Error::Create))
/// - Source metadata cannot be read ([`Error::Stat`](crate::Error::Stat))
/// - Source is a directory ([`Error::IsADirectory`](crate::Error::IsADirectory))
/// - Destination is a directory and `src` has no file name ([`Error::NoFileName`](crate::Error::NoFileName))
/// - Destination cannot be sized ([`Error::Allocate`](crate::Error::Allocate))
/// - A worker's read or write fails ([`Error::Io`](crate::Error::Io)); the
///   destination is then left at full size with partial content
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();

    let (files, total) = prepare(src, dst)?;
    let ranges = partition(total, options.workers);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %files.dst_path.display(),
        bytes = total,
        workers = ranges.len(),
        block_size = options.block_size,
        "starting range copy"
    );

    let bytes_copied = dispatch(&files.src, &files.dst, &ranges, options)?;

    Ok(CopyStats {
        destination: files.dst_path.clone(),
        bytes_copied,
        workers: ranges.len(),
        block_size: options.block_size,
        duration: start_time.elapsed(),
    })
}

/// Open both files and size the destination.
///
/// Returns the job's files together with the source length; the
/// destination already has exactly that length.
pub(crate) fn prepare(src: &Path, dst: &Path) -> Result<(JobFiles, u64)> {
    let src_file = open_source(src)?;
    // Reject unreadable or directory sources before touching the destination
    let total = file_size(&src_file, src)?;
    let (dst_path, dst_file) = resolve_destination(src, dst)?;

    let files = JobFiles {
        src: src_file,
        dst: dst_file,
        dst_path,
    };
    files.preallocate(total)?;

    Ok((files, total))
}

// =============================================================================
// Tests
// =============================================================================
