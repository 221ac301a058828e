//! Splitting a file's byte span between workers.

/// A contiguous span of bytes, `[offset, offset + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileRange {
    /// First byte of the span
    pub offset: u64,
    /// Number of bytes in the span
    pub len: u64,
}

impl FileRange {
    /// Create a range starting at `offset` spanning `len` bytes.
    pub const fn new(offset: u64, len: u64) -> Self {
        Self { offset, len }
    }

    /// One past the last byte of the span.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Whether the span contains no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Split `[0, total)` into exactly `workers` contiguous ranges.
///
/// Every range but the last is `total / workers` bytes long; the last one
/// also takes the remainder, so it is at most `workers - 1` bytes longer
/// than the others. When `workers > total` the leading ranges are empty.
/// A `workers` of 0 is treated as 1.
pub fn partition(total: u64, workers: usize) -> Vec<FileRange> {
    let workers = workers.max(1) as u64;
    let base = total / workers;

    (0..workers)
        .map(|i| {
            let offset = i * base;
            let len = if i + 1 == workers {
                total - offset
            } else {
                base
            };
            FileRange::new(offset, len)
        })
        .collect()
}
