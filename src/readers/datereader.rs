// src/readers/datereader.rs

//! Implements a [`DateReader`], the driver of deriving [`DateAnchor`]s
//! (parsed lines) from a [`LogSource`] and of binary searching a file by
//! date.
//!
//! A log file is assumed _roughly_ time-ordered: lines are non-decreasing in
//! date except for occasional lines that do not parse at all (continuation
//! lines, stack traces, binary garbage). Unparseable lines are skipped in the
//! direction of the search.
//!
//! Boundary refinement around a located line is implemented in
//! [`refiner`](crate::readers::refiner).

use crate::common::{Bytes, ExtractError, FPath, FileOffset, FileSz, Path, ResultExtract};
use crate::data::anchor::{DateAnchor, Direction};
use crate::data::datetime::{Date, DatePattern, Year};
use crate::data::range::SearchWindow;
use crate::printer::logger::Logger;
use crate::readers::linereader::LogSource;

use std::cmp::Ordering;
use std::fmt;

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Reads dates of lines of one log file.
///
/// Owns the [`LogSource`] (and so the scanning file handle); dropping a
/// `DateReader` closes the file.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`Read`]: std::io::Read
pub struct DateReader {
    pub(crate) source: LogSource,
    pattern: DatePattern,
    /// Year injected into every parsed date.
    year: Year,
    pub(crate) logger: Logger,
    /// Reused buffer holding the last line read.
    line: Bytes,
}

impl fmt::Debug for DateReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DateReader")
            .field("source", &self.source)
            .field("pattern", &self.pattern)
            .field("year", &self.year)
            .finish()
    }
}

impl DateReader {
    pub fn new(source: LogSource, pattern: DatePattern, year: Year, logger: Logger) -> DateReader {
        DateReader {
            source,
            pattern,
            year,
            logger,
            line: Bytes::with_capacity(0x200),
        }
    }

    /// Open the file at `path` and create a `DateReader` for it.
    pub fn open(path: &Path, pattern: DatePattern, year: Year, logger: Logger) -> ResultExtract<DateReader> {
        let source = LogSource::open(path)?;

        Ok(DateReader::new(source, pattern, year, logger))
    }

    #[inline(always)]
    pub fn path(&self) -> &FPath {
        self.source.path()
    }

    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.source.filesz()
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    /// The underlying [`LogSource`], e.g. to read its statistics.
    pub const fn source(&self) -> &LogSource {
        &self.source
    }

    /// The last line read, decoded lossily and without its line separator.
    /// For user-facing messages.
    pub(crate) fn last_line_lossy(&self) -> String {
        self.line
            .trim_end_with(|c| c == '\n' || c == '\r')
            .to_str_lossy()
            .into_owned()
    }

    /// Parse the single line starting at `line_offset`.
    ///
    /// Fails with [`ExtractError::UnknownLogFormat`] if that line does not
    /// parse.
    pub fn date_at(&mut self, line_offset: FileOffset) -> ResultExtract<DateAnchor> {
        let next_offset: FileOffset = self.source.read_line_at(line_offset, &mut self.line)?;
        let date: Date = self.pattern.parse_date(&self.line, self.year)?;

        Ok(DateAnchor {
            date,
            line_offset,
            next_offset,
        })
    }

    /// The Known-Date Finder.
    ///
    /// Starting with the line at `line_offset`, return the first line that
    /// parses, moving in `direction` past lines that do not.
    ///
    /// Fails with [`ExtractError::FormatAtStartOfFile`] when moving
    /// backward past the first line of the file, or with
    /// [`ExtractError::FormatAtEndOfFile`] when moving forward past the last.
    pub fn find_known_date(
        &mut self,
        line_offset: FileOffset,
        direction: Direction,
    ) -> ResultExtract<DateAnchor> {
        defn!("({}, {})", line_offset, direction);
        let mut line_offset: FileOffset = line_offset;
        loop {
            let err: ExtractError = match self.date_at(line_offset) {
                Ok(anchor) => {
                    defx!("return {:?}", anchor);
                    return Ok(anchor);
                }
                Err(err) => err,
            };
            if !err.is_unknown_log_format() {
                defx!("return Err {}", err);
                return Err(err);
            }
            defo!("line at {} does not parse", line_offset);
            match direction {
                Direction::Backward => {
                    if line_offset == 0 {
                        defx!("return FormatAtStartOfFile");
                        return Err(ExtractError::FormatAtStartOfFile);
                    }
                    line_offset = self.source.previous_line_start(line_offset)?;
                }
                Direction::Forward => {
                    // `self.line` holds the line that failed
                    let next: FileOffset = line_offset + self.line.len() as FileOffset;
                    if next >= self.filesz() || next == line_offset {
                        defx!("return FormatAtEndOfFile");
                        return Err(ExtractError::FormatAtEndOfFile);
                    }
                    line_offset = next;
                }
            }
        }
    }

    /// [`find_known_date`] that, when moving in `direction` runs off the
    /// file, retries once in the opposite direction from the same
    /// `line_offset`.
    ///
    /// Handles a run of unparseable lines at the very start (or end) of a
    /// file.
    ///
    /// [`find_known_date`]: DateReader::find_known_date
    pub fn find_known_date_either(
        &mut self,
        line_offset: FileOffset,
        direction: Direction,
    ) -> ResultExtract<DateAnchor> {
        match self.find_known_date(line_offset, direction) {
            Err(err) if err.is_file_edge_format() => {
                let opposite: Direction = match direction {
                    Direction::Backward => Direction::Forward,
                    Direction::Forward => Direction::Backward,
                };
                self.logger.warning(
                    format!(
                        "{}; searching {} from offset {}",
                        err, opposite, line_offset,
                    )
                    .as_str(),
                );
                self.find_known_date(line_offset, opposite)
            }
            result => result,
        }
    }

    /// The Binary-Search Locator.
    ///
    /// Return the offset of _some_ line within `window` whose date equals
    /// `target`; not necessarily the first or last such line.
    ///
    /// Each step snaps the window midpoint to its line start and resolves
    /// the date found there with the Known-Date Finder (backward, else
    /// forward).
    ///
    /// Fails with [`ExtractError::DateNotFound`] when `window` holds no line
    /// with date `target`, including when `window` is empty.
    pub fn locate_near(
        &mut self,
        window: SearchWindow,
        target: Date,
    ) -> ResultExtract<FileOffset> {
        defn!("({}, {})", window, target);
        let mut window: SearchWindow = window;
        while !window.is_empty() {
            let offset: FileOffset = self.source.line_start(window.midpoint())?;
            let anchor: DateAnchor = self.find_known_date_either(offset, Direction::Backward)?;
            defo!("window {}, offset {}, {:?}", window, offset, anchor);
            if anchor.line_offset < window.low {
                self.logger.warning(
                    format!(
                        "Found a log line at offset {} before the search window {}: {}",
                        anchor.line_offset,
                        window,
                        self.last_line_lossy(),
                    )
                    .as_str(),
                );
            }
            match anchor.date.cmp(&target) {
                Ordering::Greater => {
                    window.high = offset;
                }
                Ordering::Less => {
                    if offset == window.low {
                        // the midpoint snapped to `low`; step past that line
                        let next: FileOffset = if anchor.line_offset == offset {
                            anchor.next_offset
                        } else {
                            self.source.read_line_at(offset, &mut self.line)?
                        };
                        if next <= window.low {
                            break;
                        }
                        window.low = next;
                    } else {
                        window.low = offset;
                    }
                }
                Ordering::Equal => {
                    defx!("return {}", offset);
                    return Ok(offset);
                }
            }
        }
        defx!("return DateNotFound; window {}", window);

        Err(ExtractError::DateNotFound { date: target })
    }
}
