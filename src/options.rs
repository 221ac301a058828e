//! Configuration options for copy jobs.
//!
//! This module provides [`CopyOptions`], the immutable snapshot of the two
//! values every copy job needs: how many workers share the file, and how
//! large a block each worker moves per read/write step.
//!
//! The copy engine itself never looks at the environment. Callers that want
//! environment overrides opt in with [`CopyOptions::from_env`].
//!
//! # Example
//!
//! ```
//! use rangecopy::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .with_workers(8)
//!     .with_block_size(1 << 20);
//! assert_eq!(options.workers, 8);
//! ```

use std::thread;

/// Environment variable overriding the default worker count.
pub const ENV_THREADS: &str = "RANGECOPY_THREADS";

/// Environment variable overriding the default block size.
///
/// Accepts the same syntax as [`parse_byte_size`].
pub const ENV_BLOCK_SIZE: &str = "RANGECOPY_BLOCK_SIZE";

/// Default block size moved per read/write step (4 MiB).
pub const DEFAULT_BLOCK_SIZE: usize = 1 << 22;

/// Default worker count: twice the available hardware parallelism.
///
/// Oversubscribing keeps the device queue full while some workers are
/// blocked in the kernel.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(2)
}

/// Options for copy jobs.
///
/// Use [`Default::default()`] to get hardware-derived defaults, or
/// [`CopyOptions::from_env`] to additionally honour environment overrides.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `workers` | 2 × CPUs | Concurrent range copies |
/// | `block_size` | 4 MiB | Bytes per read/write step |
///
/// # Example
///
/// ```
/// use rangecopy::CopyOptions;
///
/// let options = CopyOptions::default()
///     .with_workers(32)          // Deep queue for NVMe
///     .with_block_size(16 << 20); // Large blocks for streaming storage
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Number of workers, and so of byte ranges the file is split into.
    ///
    /// Always at least 1 when set through [`CopyOptions::with_workers`].
    pub workers: usize,

    /// Maximum number of bytes moved by one positioned read/write step.
    ///
    /// Each worker allocates one buffer of this size (or of its range
    /// length, if smaller) and reuses it for the whole range.
    pub block_size: usize,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            block_size: DEFAULT_BLOCK_SIZE,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Defaults overlaid with [`ENV_THREADS`] and [`ENV_BLOCK_SIZE`].
    ///
    /// Values that are missing, unparsable, or zero leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Defaults overlaid with values from an arbitrary key lookup.
    ///
    /// This is the testable form of [`CopyOptions::from_env`].
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay_lookup(lookup)
    }

    /// Overlay [`ENV_THREADS`] and [`ENV_BLOCK_SIZE`] onto these options.
    ///
    /// Ignored values are reported through this value's warning handler.
    ///
    /// # Example
    ///
    /// ```
    /// use rangecopy::CopyOptions;
    ///
    /// let options = CopyOptions::default()
    ///     .with_warn_handler(|msg| eprintln!("Warning: {}", msg))
    ///     .overlay_env();
    /// ```
    #[must_use]
    pub fn overlay_env(self) -> Self {
        self.overlay_lookup(|key| std::env::var(key).ok())
    }

    /// [`CopyOptions::overlay_env`] with an arbitrary key lookup.
    #[must_use]
    pub fn overlay_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_THREADS) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.workers = n,
                _ => self.warn(&format!(
                    "Ignoring invalid {ENV_THREADS}={raw:?}, using {} workers",
                    self.workers
                )),
            }
        }

        if let Some(raw) = lookup(ENV_BLOCK_SIZE) {
            match parse_byte_size(&raw).and_then(|n| usize::try_from(n).ok()) {
                Some(n) if n > 0 => self.block_size = n,
                _ => self.warn(&format!(
                    "Ignoring invalid {ENV_BLOCK_SIZE}={raw:?}, using {} byte blocks",
                    self.block_size
                )),
            }
        }

        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the number of workers
    ///
    /// Value is clamped to at least 1 to prevent a division by zero when
    /// partitioning.
    #[must_use]
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n.max(1);
        self
    }

    /// Set the block size in bytes
    ///
    /// Value is clamped to at least 1 so every step makes progress.
    #[must_use]
    pub fn with_block_size(mut self, bytes: usize) -> Self {
        self.block_size = bytes.max(1);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}

/// Parse a human-readable byte size.
///
/// Accepts a decimal integer with an optional binary suffix: `K`, `M`, `G`
/// or `T`, case-insensitive, optionally followed by `i` and/or `B`
/// (`64K`, `4MiB`, `1g`, `512`, `512B`). Returns `None` on malformed input
/// or overflow.
///
/// # Example
///
/// ```
/// use rangecopy::parse_byte_size;
///
/// assert_eq!(parse_byte_size("4M"), Some(4 * 1024 * 1024));
/// assert_eq!(parse_byte_size("512"), Some(512));
/// assert_eq!(parse_byte_size("lots"), None);
/// ```
pub fn parse_byte_size(input: &str) -> Option<u64> {
    let s = input.trim();
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return None;
    }
    let (digits, suffix) = s.split_at(digits_end);
    let value: u64 = digits.parse().ok()?;

    let shift = match suffix.trim_start().to_ascii_lowercase().as_str() {
        "" | "b" => 0,
        "k" | "kb" | "kib" => 10,
        "m" | "mb" | "mib" => 20,
        "g" | "gb" | "gib" => 30,
        "t" | "tb" | "tib" => 40,
        _ => return None,
    };
    value.checked_mul(1u64 << shift)
}
