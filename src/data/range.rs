// src/data/range.rs

//! Byte ranges: the [`SearchWindow`] a binary search narrows and the
//! [`ExtractionRange`] finally copied.

use crate::common::{ExtractError, FileOffset, ResultExtract};

use std::fmt;

/// Half-open byte range `[low, high)` searched by the Binary-Search Locator.
///
/// `low` must be a line start offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchWindow {
    pub low: FileOffset,
    pub high: FileOffset,
}

impl SearchWindow {
    pub const fn new(low: FileOffset, high: FileOffset) -> SearchWindow {
        SearchWindow { low, high }
    }

    pub const fn is_empty(&self) -> bool {
        self.low >= self.high
    }

    /// Byte offset halfway between `low` and `high`, rounded down.
    pub const fn midpoint(&self) -> FileOffset {
        self.low + (self.high - self.low) / 2
    }
}

impl fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

/// Half-open byte range `[start, end)` copied verbatim to the output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExtractionRange {
    pub start: FileOffset,
    pub end: FileOffset,
}

impl ExtractionRange {
    /// Create a new `ExtractionRange`, `start` must be `<=` `end`.
    pub fn new(start: FileOffset, end: FileOffset) -> ResultExtract<ExtractionRange> {
        if start > end {
            return Err(ExtractError::BadRange { start, end });
        }

        Ok(ExtractionRange { start, end })
    }

    /// Count of bytes in the range.
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for ExtractionRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
