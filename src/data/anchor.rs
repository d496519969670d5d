// src/data/anchor.rs

//! Results of parsing a line at a known offset: [`DateAnchor`], the search
//! [`Direction`] used to reach one, and the [`Boundary`] found by refining
//! around one.

use crate::common::FileOffset;
use crate::data::datetime::Date;

use std::fmt;

/// Direction the Known-Date Finder moves when a line does not parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Toward the start of the file.
    Backward,
    /// Toward the end of the file.
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Backward => write!(f, "backward"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

/// A line that parsed: its [`Date`] and where it is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateAnchor {
    /// Date parsed from the line, with the reference year.
    pub date: Date,
    /// Offset of the first byte of the line.
    pub line_offset: FileOffset,
    /// Offset one past the last byte of the line (including its `'\n'`);
    /// the start of the next line, or the file size.
    pub next_offset: FileOffset,
}

/// Result of a boundary refinement scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Boundary {
    /// A line with a strictly older (scanning backward) or strictly newer
    /// (scanning forward) date was found.
    Inner {
        /// The line with the strictly older/newer date.
        outer: FileOffset,
        /// The first (backward) or last (forward) line seen still carrying
        /// the target date.
        edge: FileOffset,
    },
    /// The scan reached the start (backward) or end (forward) of the file
    /// while still at the target date.
    /// Holds `0` for the start, or the last line at the target date for the
    /// end.
    FileEdge(FileOffset),
}

impl Boundary {
    /// The `(outer, edge)` pair; a `FileEdge(o)` is `(o, o)`.
    pub const fn offsets(&self) -> (FileOffset, FileOffset) {
        match *self {
            Boundary::Inner { outer, edge } => (outer, edge),
            Boundary::FileEdge(offset) => (offset, offset),
        }
    }

    pub const fn is_file_edge(&self) -> bool {
        matches!(*self, Boundary::FileEdge(_))
    }
}
