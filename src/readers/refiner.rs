// src/readers/refiner.rs

//! The Boundary Refiner: linear scans from a located line outward to the
//! exact first or last line carrying a date.
//!
//! [`DateReader::locate_near`] returns _some_ line with the target date. The
//! scans here walk line by line away from it, skipping unparseable lines,
//! until a line with a strictly older (backward) or strictly newer (forward)
//! date is found or a file edge is reached.

use crate::common::{ExtractError, FileOffset, ResultExtract};
use crate::data::anchor::{Boundary, DateAnchor, Direction};
use crate::data::datetime::Date;
use crate::readers::datereader::DateReader;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

impl DateReader {
    /// Scan backward from the line at `line_offset` for the first line with
    /// a date strictly older than `current_date`.
    ///
    /// Returns [`Boundary::Inner`] with that older line as `outer` and the
    /// oldest line seen at `current_date` or newer as `edge`.
    /// Returns [`Boundary::FileEdge(0)`] when the start of the file is
    /// reached first, either directly or through unparseable lines.
    ///
    /// [`Boundary::FileEdge(0)`]: Boundary::FileEdge
    pub fn find_previous_boundary(
        &mut self,
        line_offset: FileOffset,
        current_date: Date,
    ) -> ResultExtract<Boundary> {
        defn!("({}, {})", line_offset, current_date);
        let mut anchor: DateAnchor = self.find_known_date_either(line_offset, Direction::Backward)?;
        let mut edge: FileOffset = line_offset;
        while anchor.date >= current_date {
            edge = anchor.line_offset;
            if anchor.line_offset == 0 {
                self.logger.warning(
                    format!("Reached start of file while searching for a date before {}", current_date)
                        .as_str(),
                );
                defx!("return FileEdge(0)");
                return Ok(Boundary::FileEdge(0));
            }
            let previous: FileOffset = self.source.previous_line_start(anchor.line_offset)?;
            anchor = match self.find_known_date(previous, Direction::Backward) {
                Ok(val) => val,
                Err(ExtractError::FormatAtStartOfFile) => {
                    self.logger.warning(
                        format!(
                            "Reached start of file through unparseable lines while searching for a date before {}",
                            current_date
                        )
                        .as_str(),
                    );
                    defx!("return FileEdge(0); unparseable lines at start of file");
                    return Ok(Boundary::FileEdge(0));
                }
                Err(err) => {
                    defx!("return Err {}", err);
                    return Err(err);
                }
            };
            defo!("{:?}", anchor);
        }
        let boundary = Boundary::Inner {
            outer: anchor.line_offset,
            edge,
        };
        defx!("return {:?}", boundary);

        Ok(boundary)
    }

    /// Scan forward from the line at `line_offset` for the first line with
    /// a date strictly newer than `current_date`.
    ///
    /// Returns [`Boundary::Inner`] with that newer line as `outer` and the
    /// newest line seen at `current_date` or older as `edge`.
    /// Returns [`Boundary::FileEdge`] holding the last line seen at
    /// `current_date` or older when the end of the file is reached first.
    pub fn find_next_boundary(
        &mut self,
        line_offset: FileOffset,
        current_date: Date,
    ) -> ResultExtract<Boundary> {
        defn!("({}, {})", line_offset, current_date);
        let mut anchor: DateAnchor = match self.find_known_date(line_offset, Direction::Forward) {
            Ok(val) => val,
            Err(ExtractError::FormatAtEndOfFile) => {
                self.logger.warning(
                    format!("No parseable line after offset {}; using end of file", line_offset).as_str(),
                );
                defx!("return FileEdge({}); no parseable line", line_offset);
                return Ok(Boundary::FileEdge(line_offset));
            }
            Err(err) => {
                defx!("return Err {}", err);
                return Err(err);
            }
        };
        let mut edge: FileOffset = line_offset;
        while anchor.date <= current_date {
            edge = anchor.line_offset;
            if anchor.next_offset >= self.filesz() {
                self.logger.warning(
                    format!("Reached end of file while searching for a date after {}", current_date).as_str(),
                );
                defx!("return FileEdge({})", edge);
                return Ok(Boundary::FileEdge(edge));
            }
            anchor = match self.find_known_date(anchor.next_offset, Direction::Forward) {
                Ok(val) => val,
                Err(ExtractError::FormatAtEndOfFile) => {
                    self.logger.warning(
                        format!(
                            "Reached end of file through unparseable lines while searching for a date after {}",
                            current_date
                        )
                        .as_str(),
                    );
                    defx!("return FileEdge({}); unparseable lines at end of file", edge);
                    return Ok(Boundary::FileEdge(edge));
                }
                Err(err) => {
                    defx!("return Err {}", err);
                    return Err(err);
                }
            };
            defo!("{:?}", anchor);
        }
        let boundary = Boundary::Inner {
            outer: anchor.line_offset,
            edge,
        };
        defx!("return {:?}", boundary);

        Ok(boundary)
    }
}
