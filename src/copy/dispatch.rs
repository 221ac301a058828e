//! Fan-out of range copies onto a fixed worker pool.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use super::chunk::{ReadAt, WriteAt, copy_range};
use super::range::FileRange;

/// Copy every range concurrently and wait for all of them.
///
/// Runs one task per range on a pool of `options.workers` threads. Every
/// task runs to completion even after a sibling has failed; there is no
/// cancellation. The first failure to be observed becomes the returned
/// error, and any later failures are passed to [`CopyOptions::warn`] so
/// none is lost.
///
/// Returns the total number of bytes copied.
pub(crate) fn dispatch<R, W>(
    src: &R,
    dst: &W,
    ranges: &[FileRange],
    options: &CopyOptions,
) -> Result<u64>
where
    R: ReadAt + Sync + ?Sized,
    W: WriteAt + Sync + ?Sized,
{
    let copied = AtomicU64::new(0);
    let first_failure: Mutex<Option<Error>> = Mutex::new(None);

    let do_copy = || {
        ranges
            .par_iter()
            .enumerate()
            // One range per task, never batched onto one thread
            .with_max_len(1)
            .for_each(|(index, range)| {
                match copy_range(src, dst, *range, options.block_size) {
                    Ok(bytes) => {
                        copied.fetch_add(bytes, Ordering::Relaxed);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            worker = index,
                            offset = range.offset,
                            len = range.len,
                            "range copied"
                        );
                    }
                    Err(e) => record_failure(&first_failure, index, e, options),
                }
            });
    };

    // Use custom thread pool only if parallelism differs from the current pool
    if options.workers != rayon::current_num_threads() {
        let custom_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .thread_name(|i| format!("rangecopy-{i}"))
            .build();

        match custom_pool {
            Ok(pool) => pool.install(do_copy),
            Err(e) => {
                options.warn(&format!(
                    "Failed to create thread pool ({e}), using global pool"
                ));
                do_copy();
            }
        }
    } else {
        do_copy();
    }

    let failure = first_failure
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    match failure {
        Some(e) => Err(e),
        None => Ok(copied.into_inner()),
    }
}

/// Keep the first failure; report every later one.
fn record_failure(
    slot: &Mutex<Option<Error>>,
    index: usize,
    error: Error,
    options: &CopyOptions,
) {
    let mut first = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if first.is_none() {
        #[cfg(feature = "tracing")]
        tracing::debug!(worker = index, error = %error, "first worker failure");
        *first = Some(error);
    } else {
        drop(first);
        options.warn(&format!("Worker {index} also failed: {error}"));
    }
}
