//! The per-worker block loop.
//!
//! A worker owns one [`FileRange`] and moves it from source to destination
//! one block at a time using positioned I/O, so that any number of workers
//! can share the same two file handles without coordinating a cursor.

use crate::error::{Error, IoOp, Result, is_transient};
use std::fs::File;
use std::io;

use super::range::FileRange;

// =============================================================================
// Positioned I/O
// =============================================================================

/// Read at an explicit offset without touching a shared cursor.
pub trait ReadAt {
    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Same contract as `pread(2)`: may return fewer bytes than requested,
    /// and returns 0 at end of file.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// Write at an explicit offset without touching a shared cursor.
pub trait WriteAt {
    /// Write up to `buf.len()` bytes starting at `offset`.
    ///
    /// Same contract as `pwrite(2)`: may write fewer bytes than requested.
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize>;
}

#[cfg(unix)]
impl ReadAt for File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }
}

#[cfg(unix)]
impl WriteAt for File {
    #[inline]
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }
}

// seek_read/seek_write move the handle's cursor on Windows, but every call
// carries its own offset, so concurrent callers still never depend on it.
#[cfg(windows)]
impl ReadAt for File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

#[cfg(windows)]
impl WriteAt for File {
    #[inline]
    fn write_at(&self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }
}

// =============================================================================
// Block loop
// =============================================================================

/// Copy `range` from `src` to the same offsets in `dst`.
///
/// Moves at most `block_size` bytes per step, in increasing offset order,
/// through a single buffer allocated once for the whole range. Returns the
/// number of bytes copied, which is always `range.len` on success.
///
/// `Interrupted` and `WouldBlock` are retried in place without limit.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying the failing side and absolute offset when
/// a read or write fails for any other reason, when the source ends before
/// the range does (`UnexpectedEof`), or when the destination accepts no
/// bytes (`WriteZero`).
pub fn copy_range<R, W>(src: &R, dst: &W, range: FileRange, block_size: usize) -> Result<u64>
where
    R: ReadAt + ?Sized,
    W: WriteAt + ?Sized,
{
    if range.is_empty() {
        return Ok(0);
    }

    let block_size = block_size.max(1);
    // Never allocate more than the range needs
    let buf_len = usize::try_from(range.len).map_or(block_size, |len| len.min(block_size));
    let mut buffer = vec![0u8; buf_len];

    let mut offset = range.offset;
    let mut remaining = range.len;

    while remaining > 0 {
        let step = usize::try_from(remaining).map_or(buf_len, |r| r.min(buf_len));
        let chunk = &mut buffer[..step];

        read_full_at(src, chunk, offset)?;
        write_full_at(dst, chunk, offset)?;

        offset += step as u64;
        remaining -= step as u64;
    }

    Ok(range.len)
}

/// Fill `buf` from `offset`, retrying transient errors and short reads.
fn read_full_at<R: ReadAt + ?Sized>(src: &R, buf: &mut [u8], offset: u64) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let at = offset + filled as u64;
        match src.read_at(&mut buf[filled..], at) {
            Ok(0) => {
                return Err(Error::Io {
                    op: IoOp::Read,
                    offset: at,
                    source: io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "source ended before the copy range",
                    ),
                });
            }
            Ok(n) => filled += n,
            Err(e) if is_transient(&e) => continue,
            Err(e) => {
                return Err(Error::Io {
                    op: IoOp::Read,
                    offset: at,
                    source: e,
                });
            }
        }
    }
    Ok(())
}

/// Write all of `buf` at `offset`, retrying transient errors and short writes.
fn write_full_at<W: WriteAt + ?Sized>(dst: &W, buf: &[u8], offset: u64) -> Result<()> {
    let mut written = 0;
    while written < buf.len() {
        let at = offset + written as u64;
        match dst.write_at(&buf[written..], at) {
            Ok(0) => {
                return Err(Error::Io {
                    op: IoOp::Write,
                    offset: at,
                    source: io::Error::from(io::ErrorKind::WriteZero),
                });
            }
            Ok(n) => written += n,
            Err(e) if is_transient(&e) => continue,
            Err(e) => {
                return Err(Error::Io {
                    op: IoOp::Write,
                    offset: at,
                    source: e,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
