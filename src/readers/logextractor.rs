// src/readers/logextractor.rs

//! Implements a [`LogExtractor`], the Orchestrator: resolve the byte range
//! of a log file covering a date range, then copy it.
//!
//! Resolution uses two binary searches, one per requested date, each
//! followed by a boundary refinement scan:
//!
//! 1. the start date is located in the whole file, then refined backward to
//!    the first line carrying it
//! 2. the end date is located after the start, then refined forward (from
//!    the start, so no line between the two dates is skipped) to the last
//!    line carrying it
//!
//! A requested date missing from the file falls back to the start (or end)
//! of the file with a warning.
//!
//! The scanning file handle is closed before the extraction handles are
//! opened; the output file is not created or truncated until both offsets
//! are resolved.

use crate::common::{ExtractError, FPath, FileOffset, FileSz, Path, ResultExtract};
use crate::data::anchor::Boundary;
use crate::data::datetime::{
    current_year,
    parse_requested_date,
    Date,
    DatePattern,
    Year,
    DEFAULT_LOG_DATE_FORMAT,
    DEFAULT_LOG_LINE_REGEX,
    DEFAULT_REGEX_GROUP_NB,
};
use crate::data::range::{ExtractionRange, SearchWindow};
use crate::printer::logger::Logger;
use crate::readers::datereader::DateReader;
use crate::readers::helpers::{fpath_to_path, path_filesz};
use crate::readers::rangeextractor::extract_between_offsets;

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// One extraction to run: where from, where to, and which dates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractRequest {
    pub input: FPath,
    pub output: FPath,
    /// First date to extract, inclusive.
    pub start_date: Date,
    /// Last date to extract, inclusive.
    pub end_date: Date,
    /// Year injected into every date parsed from the log.
    pub reference_year: Year,
}

impl ExtractRequest {
    /// Create a new `ExtractRequest` from user-passed `DD/MM/YYYY` dates.
    ///
    /// `reference_year` defaults to the current year.
    /// Fails if a date does not parse or if `end_date` is before
    /// `start_date`.
    pub fn new(
        input: FPath,
        output: FPath,
        start_date: &str,
        end_date: &str,
        reference_year: Option<Year>,
    ) -> ResultExtract<ExtractRequest> {
        let start_date: Date = parse_requested_date(start_date)?;
        let end_date: Date = parse_requested_date(end_date)?;
        let request = ExtractRequest {
            input,
            output,
            start_date,
            end_date,
            reference_year: reference_year.unwrap_or_else(current_year),
        };
        request.validate()?;

        Ok(request)
    }

    /// Fails with [`ExtractError::EndBeforeStart`] if `end_date` is before
    /// `start_date`.
    pub fn validate(&self) -> ResultExtract<()> {
        if self.end_date < self.start_date {
            return Err(ExtractError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }
}

impl fmt::Display for ExtractRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} [{} .. {}] (year {}) → {:?}",
            self.input, self.start_date, self.end_date, self.reference_year, self.output
        )
    }
}

/// Drives a [`DateReader`] to resolve an [`ExtractionRange`], then the
/// Range Extractor to copy it.
#[derive(Clone, Debug)]
pub struct LogExtractor {
    pattern: DatePattern,
    logger: Logger,
}

impl LogExtractor {
    pub fn new(pattern: DatePattern, logger: Logger) -> LogExtractor {
        LogExtractor { pattern, logger }
    }

    pub const fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    /// Resolve the byte range of `request.input` holding the lines dated
    /// `request.start_date` through `request.end_date`. Writes nothing.
    pub fn resolve_range(&self, request: &ExtractRequest) -> ResultExtract<ExtractionRange> {
        defn!("({})", request);
        request.validate()?;
        let path: &Path = fpath_to_path(&request.input);
        let filesz: FileSz = path_filesz(path)?;
        self.logger
            .verbose(format!("File {:?} is {} bytes", request.input, filesz).as_str());

        let mut reader = DateReader::open(path, self.pattern.clone(), request.reference_year, self.logger)?;
        let start_offset: FileOffset = self.resolve_start(&mut reader, request.start_date)?;
        let end_offset: FileOffset = self.resolve_end(&mut reader, start_offset, request.end_date)?;
        self.logger.verbose(
            format!(
                "Read {} lines, scanned {} bytes backward, {} seeks",
                reader.source().count_lines_read(),
                reader.source().count_bytes_scanned_backward(),
                reader.source().count_seeks(),
            )
            .as_str(),
        );
        // close the scanning handle
        drop(reader);

        let range = ExtractionRange::new(start_offset, end_offset)?;
        defx!("return {}", range);

        Ok(range)
    }

    /// Offset of the first line dated `start_date`, else `0`.
    fn resolve_start(&self, reader: &mut DateReader, start_date: Date) -> ResultExtract<FileOffset> {
        defn!("({})", start_date);
        self.logger.info("Searching for a line around the starting date...");
        let window = SearchWindow::new(0, reader.filesz());
        let offset: FileOffset = match reader.locate_near(window, start_date) {
            Ok(val) => val,
            Err(err) if err.is_date_not_found() => {
                self.logger
                    .warning(format!("Starting date {} not found, using start of file", start_date).as_str());
                defx!("return 0; {}", err);
                return Ok(0);
            }
            Err(err) => {
                defx!("return Err {}", err);
                return Err(err);
            }
        };
        self.logger
            .success(format!("Found a line around the starting date at offset {}", offset).as_str());
        self.logger
            .info("Searching for the first line of the starting date...");
        let (_outer, start_offset) = reader.find_previous_boundary(offset, start_date)?.offsets();
        self.logger
            .success(format!("First line found at offset {}", start_offset).as_str());
        defx!("return {}", start_offset);

        Ok(start_offset)
    }

    /// Offset one before the first line dated after `end_date`, else the
    /// file size.
    fn resolve_end(
        &self,
        reader: &mut DateReader,
        start_offset: FileOffset,
        end_date: Date,
    ) -> ResultExtract<FileOffset> {
        defn!("({}, {})", start_offset, end_date);
        let filesz: FileSz = reader.filesz();
        self.logger.info("Searching for a line around the ending date...");
        let window = SearchWindow::new(start_offset, filesz);
        match reader.locate_near(window, end_date) {
            Ok(offset) => {
                self.logger
                    .success(format!("Found a line around the ending date at offset {}", offset).as_str());
            }
            Err(err) if err.is_date_not_found() => {
                self.logger
                    .warning(format!("Ending date {} not found, using end of file", end_date).as_str());
                defx!("return {}; {}", filesz, err);
                return Ok(filesz);
            }
            Err(err) => {
                defx!("return Err {}", err);
                return Err(err);
            }
        }
        self.logger
            .info("Searching for the last line of the ending date...");
        let boundary: Boundary = reader.find_next_boundary(start_offset, end_date)?;
        let end_offset: FileOffset = if boundary.is_file_edge() {
            filesz
        } else {
            // exclude the separator ending the last selected line
            let (outer, _edge) = boundary.offsets();
            std::cmp::max(outer.saturating_sub(1), start_offset)
        };
        self.logger
            .success(format!("Last line ends at offset {}", end_offset).as_str());
        defx!("return {}", end_offset);

        Ok(end_offset)
    }

    /// Resolve the range of `request` then copy it to `request.output`.
    ///
    /// Returns the range copied.
    pub fn extract(&self, request: &ExtractRequest) -> ResultExtract<ExtractionRange> {
        defn!("({})", request);
        let range: ExtractionRange = self.resolve_range(request)?;
        self.logger.info(
            format!("Extracting bytes {} to {:?}...", range, request.output).as_str(),
        );
        let copied: u64 = extract_between_offsets(
            fpath_to_path(&request.input),
            fpath_to_path(&request.output),
            &range,
        )?;
        self.logger
            .success(format!("Wrote {} bytes to {:?}", copied, request.output).as_str());
        defx!("return {}", range);

        Ok(range)
    }
}

/// Extract the lines of `input` dated `start_date` through `end_date`
/// (both `DD/MM/YYYY`) to `output`, using the default log line pattern and a
/// silent logger.
///
/// `reference_year` defaults to the current year.
pub fn extract(
    input: &str,
    output: &str,
    start_date: &str,
    end_date: &str,
    reference_year: Option<Year>,
) -> ResultExtract<ExtractionRange> {
    let request = ExtractRequest::new(
        FPath::from(input),
        FPath::from(output),
        start_date,
        end_date,
        reference_year,
    )?;
    let pattern = DatePattern::new(DEFAULT_LOG_LINE_REGEX, DEFAULT_REGEX_GROUP_NB, DEFAULT_LOG_DATE_FORMAT)?;

    LogExtractor::new(pattern, Logger::silent()).extract(&request)
}
