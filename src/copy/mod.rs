//! Core copy operations.
//!
//! This module provides the parallel range copy engine: destination
//! handling, byte-span partitioning, the per-worker block loop, and the
//! fan-out onto a fixed worker pool.

mod chunk;
mod dispatch;
mod file;
pub(crate) mod handles;
mod range;

// Re-export public API
pub use chunk::{ReadAt, WriteAt, copy_range};
pub use file::{CopyStats, copy_file};
pub use range::{FileRange, partition};
