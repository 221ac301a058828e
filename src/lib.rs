//! # rangecopy
//!
//! Copy one large file with many threads, each writing its own byte range.
//!
//! A single sequential stream rarely saturates modern storage: NVMe drives,
//! RAID sets and parallel filesystems only reach full bandwidth with many
//! requests in flight. `rangecopy` splits the source into one contiguous
//! range per worker and lets every worker move its range with positioned
//! reads and writes (`pread`/`pwrite`) against the same two file handles.
//!
//! ## Core Features
//!
//! - **Range partitioning**: `[0, size)` split into exactly `workers` contiguous ranges
//! - **Positioned I/O**: no shared file cursor, no locking between workers
//! - **Pre-sized destination**: the destination has its final length before any worker writes
//! - **Transient-error retry**: `EINTR`/`EAGAIN` retried in place
//! - **Directory destinations**: copying into a directory uses the source file name
//! - **Structured concurrency**: every worker finishes before the job returns
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use rangecopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("vm.qcow2", "/mnt/nvme/")
//!     .workers(16)
//!     .run()?;
//! println!("Copied {} bytes to {}", stats.bytes_copied, stats.destination.display());
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use rangecopy::{copy_file, CopyOptions};
//! use std::path::Path;
//!
//! let options = CopyOptions::from_env()     // RANGECOPY_THREADS / RANGECOPY_BLOCK_SIZE
//!     .with_block_size(8 << 20);
//!
//! let stats = copy_file(Path::new("dump.bin"), Path::new("dump.copy"), &options)?;
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## Failure Semantics
//!
//! Open, metadata and sizing failures abort the job before any data is
//! written. If a worker fails, the other workers still run to completion,
//! then the first failure is returned. The destination is left at full
//! size with partially copied content; there is no rollback.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod utils;

pub use builder::CopyBuilder;
pub use copy::{CopyStats, FileRange, ReadAt, WriteAt, copy_file, copy_range, partition};
pub use error::{Error, ErrorCode, IoOp, Result, is_no_space_error, is_transient};
pub use options::{
    CopyOptions, DEFAULT_BLOCK_SIZE, ENV_BLOCK_SIZE, ENV_THREADS, default_workers,
    parse_byte_size,
};
