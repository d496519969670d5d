// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common type aliases, constants, and the [`ExtractError`] type shared by
//! the readers.

use std::fmt;

use crate::data::datetime::Date;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

/// `F`ile `Path`
pub type FPath = String;
pub type FileOpenOptions = std::fs::OpenOptions;

/// File Size in bytes
pub type FileSz = u64;

/// Offset into a file in bytes
pub type FileOffset = u64;

/// General purpose counting type, used for statistics
pub type Count = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Single-byte newLine char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;

/// NUL byte, stripped from lines before matching
#[allow(non_upper_case_globals)]
pub const NULu8: u8 = 0;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Every failure the readers can report.
///
/// [`UnknownLogFormat`] and [`DateNotFound`] are _conditions_ the callers
/// recover from (skip a line, fall back to a file edge). The remaining
/// variants are fatal for the extraction.
///
/// [`UnknownLogFormat`]: ExtractError::UnknownLogFormat
/// [`DateNotFound`]: ExtractError::DateNotFound
#[derive(Debug)]
pub enum ExtractError {
    /// The line does not match the configured line pattern or its date
    /// substring does not parse with the configured date format.
    UnknownLogFormat { line: String },
    /// The date is not present in the searched window.
    DateNotFound { date: Date },
    /// Searching backward reached the start of the file without finding a
    /// parseable line.
    FormatAtStartOfFile,
    /// Searching forward reached the end of the file without finding a
    /// parseable line.
    FormatAtEndOfFile,
    /// Requested end date is before the requested start date.
    EndBeforeStart { start: Date, end: Date },
    /// A user-passed date could not be parsed.
    BadRequestedDate { value: String, reason: String },
    /// The configured line pattern or date format is unusable.
    BadPattern { reason: String },
    /// A configuration property is missing or has the wrong type.
    BadProperty { key: String, reason: String },
    /// Filesystem failure on `path`.
    Io { path: FPath, error: std::io::Error },
    /// An extraction range with `start` after `end`.
    BadRange { start: FileOffset, end: FileOffset },
    /// The source ran out of bytes before the range was copied.
    ShortCopy { expected: u64, copied: u64 },
}

impl ExtractError {
    /// Helper to wrap a [`std::io::Error`] with the path it happened on.
    pub fn io(path: &Path, error: std::io::Error) -> ExtractError {
        ExtractError::Io {
            path: path.to_string_lossy().to_string(),
            error,
        }
    }

    /// Returns `true` for [`ExtractError::UnknownLogFormat`].
    #[inline(always)]
    pub const fn is_unknown_log_format(&self) -> bool {
        matches!(*self, ExtractError::UnknownLogFormat { .. })
    }

    /// Returns `true` for [`ExtractError::DateNotFound`].
    #[inline(always)]
    pub const fn is_date_not_found(&self) -> bool {
        matches!(*self, ExtractError::DateNotFound { .. })
    }

    /// Returns `true` if the Known-Date Finder ran off either end of the
    /// file.
    #[inline(always)]
    pub const fn is_file_edge_format(&self) -> bool {
        matches!(*self, ExtractError::FormatAtStartOfFile | ExtractError::FormatAtEndOfFile)
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::UnknownLogFormat { line } => {
                write!(f, "unknown log format: {:?}", line)
            }
            ExtractError::DateNotFound { date } => {
                write!(f, "date ({}) not found", date)
            }
            ExtractError::FormatAtStartOfFile => {
                write!(f, "format error: cannot resolve format at start of file")
            }
            ExtractError::FormatAtEndOfFile => {
                write!(f, "format error: cannot resolve format at end of file")
            }
            ExtractError::EndBeforeStart { start, end } => {
                write!(f, "end date {} is before start date {}", end, start)
            }
            ExtractError::BadRequestedDate { value, reason } => {
                write!(f, "bad date {:?}: {}", value, reason)
            }
            ExtractError::BadPattern { reason } => {
                write!(f, "bad log pattern: {}", reason)
            }
            ExtractError::BadProperty { key, reason } => {
                write!(f, "bad property {:?}: {}", key, reason)
            }
            ExtractError::Io { path, error } => {
                write!(f, "{}: {}", path, error)
            }
            ExtractError::BadRange { start, end } => {
                write!(f, "extraction range start {} is after end {}", start, end)
            }
            ExtractError::ShortCopy { expected, copied } => {
                write!(f, "copied {} bytes, expected {}", copied, expected)
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A typed [`Result`] for reader functions.
pub type ResultExtract<T> = std::result::Result<T, ExtractError>;
