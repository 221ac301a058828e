//! Builder API for ergonomic copy jobs.
//!
//! The builder pattern provides a fluent interface for configuring and executing
//! a copy job. This is often more convenient than manually constructing
//! [`CopyOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use rangecopy::CopyBuilder;
//!
//! // Hardware-derived worker count, 4 MiB blocks
//! let stats = CopyBuilder::new("disk.img", "/backup").run()?;
//! println!("Copied {} bytes", stats.bytes_copied);
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use rangecopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("disk.img", "/backup/disk.img")
//!     .workers(8)             // Split the file 8 ways
//!     .block_size(1 << 20)    // 1 MiB per read/write step
//!     .run()?;
//! # Ok::<(), rangecopy::Error>(())
//! ```

use crate::copy::{CopyStats, copy_file};
use crate::error::Result;
use crate::options::CopyOptions;
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a copy job.
///
/// Settings are resolved when the job runs, so the order of the calls does
/// not matter: explicit setters always win over environment values, and the
/// warning handler sees environment warnings wherever it is set.
///
/// # Example
///
/// ```no_run
/// use rangecopy::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/archive.tar", "/mnt/fast/")
///     .env_defaults()
///     .workers(16)
///     .run()?;
/// # Ok::<(), rangecopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    workers: Option<usize>,
    block_size: Option<usize>,
    warn_handler: Option<fn(&str)>,
    env_defaults: bool,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses [`CopyOptions::default()`]; the environment is not consulted
    /// unless [`CopyBuilder::env_defaults`] is called.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            workers: None,
            block_size: None,
            warn_handler: None,
            env_defaults: false,
        }
    }

    /// Take defaults from the environment, as [`CopyOptions::from_env`] does.
    ///
    /// Values set with [`workers`](Self::workers) or
    /// [`block_size`](Self::block_size) still take precedence.
    #[must_use]
    pub fn env_defaults(mut self) -> Self {
        self.env_defaults = true;
        self
    }

    /// Set the number of workers (and byte ranges).
    ///
    /// Set to 1 for a sequential copy.
    #[must_use]
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = Some(n);
        self
    }

    /// Set the maximum number of bytes moved per read/write step.
    #[must_use]
    pub fn block_size(mut self, bytes: usize) -> Self {
        self.block_size = Some(bytes);
        self
    }

    /// Set a handler for warnings.
    ///
    /// Warnings include ignored environment values and worker failures
    /// beyond the first one.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rangecopy::CopyBuilder;
    ///
    /// let stats = CopyBuilder::new("src.bin", "dst.bin")
    ///     .on_warning(|msg| eprintln!("Warning: {}", msg))
    ///     .run()?;
    /// # Ok::<(), rangecopy::Error>(())
    /// ```
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Resolve the options the job will run with.
    ///
    /// Reads the environment if [`env_defaults`](Self::env_defaults) was
    /// called, reporting ignored values to the warning handler.
    pub fn options(&self) -> CopyOptions {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    fn resolve_with<F>(&self, lookup: F) -> CopyOptions
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = CopyOptions::default();
        if let Some(handler) = self.warn_handler {
            options = options.with_warn_handler(handler);
        }
        if self.env_defaults {
            options = options.overlay_lookup(lookup);
        }
        if let Some(n) = self.workers {
            options = options.with_workers(n);
        }
        if let Some(bytes) = self.block_size {
            options = options.with_block_size(bytes);
        }
        options
    }

    /// Execute the copy job.
    ///
    /// # Errors
    ///
    /// See [`copy_file`].
    pub fn run(self) -> Result<CopyStats> {
        let options = self.options();
        copy_file(&self.src, &self.dst, &options)
    }
}
