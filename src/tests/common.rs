// src/tests/common.rs

//! Common test fixtures and helpers.

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use crate::common::{FPath, FileOffset, NLu8};
use crate::data::datetime::{
    Date,
    DatePattern,
    NaiveDate,
    Year,
    DEFAULT_LOG_DATE_FORMAT,
    DEFAULT_LOG_LINE_REGEX,
    DEFAULT_REGEX_GROUP_NB,
};
use crate::debug::helpers::{create_temp_file, ntf_fpath, NamedTempFile};
use crate::printer::logger::Logger;
use crate::readers::datereader::DateReader;

use std::path::Path;

use ::lazy_static::lazy_static;

/// Reference year of every fixture log.
pub const YEAR: Year = 2024;

/// Five lines, one per day, Jan 1 to Jan 5; each line is 20 bytes.
pub const FIVE_DAYS: &str = "\
Jan 1 10:00:00 h m1
Jan 2 10:00:00 h m2
Jan 3 10:00:00 h m3
Jan 4 10:00:00 h m4
Jan 5 10:00:00 h m5
";

/// A continuation line between two dated lines.
pub const WITH_GARBAGE: &str = "\
Jan 1 10:00:00 h m1
CONTINUATION garbage
Jan 2 10:00:00 h m2
Jan 3 10:00:00 h m3
";

/// Unparseable lines at both ends of the file.
pub const GARBAGE_EDGES: &str = "\
garbage at the start
more garbage
Jan 2 10:00:00 h m2
Jan 3 10:00:00 h m3
trailing garbage
";

/// Several lines per day with varying lengths.
pub const REPEATED_DAYS: &str = "\
Jan 1 08:00:00 host first message of the first day
Jan 1 09:00:00 host m
Jan 1 23:59:59 host last message of the first day with extra words
Jan 3 00:00:00 host a
Jan 3 00:00:01 host b
Jan 3 00:00:02 host a much much longer message to move the midpoint around
Jan 4 12:00:00 host x
Jan 7 12:00:00 host single line on the seventh
Jan 7 12:00:01 host another
Jan 7 12:00:02 host and another
Jan 9 01:02:03 host last day
";

lazy_static! {
    pub static ref NTF_FIVE_DAYS: NamedTempFile = create_temp_file(FIVE_DAYS);
    pub static ref NTF_FIVE_DAYS_PATH: FPath = ntf_fpath(&NTF_FIVE_DAYS);
    pub static ref NTF_WITH_GARBAGE: NamedTempFile = create_temp_file(WITH_GARBAGE);
    pub static ref NTF_WITH_GARBAGE_PATH: FPath = ntf_fpath(&NTF_WITH_GARBAGE);
    pub static ref NTF_GARBAGE_EDGES: NamedTempFile = create_temp_file(GARBAGE_EDGES);
    pub static ref NTF_GARBAGE_EDGES_PATH: FPath = ntf_fpath(&NTF_GARBAGE_EDGES);
    pub static ref NTF_REPEATED_DAYS: NamedTempFile = create_temp_file(REPEATED_DAYS);
    pub static ref NTF_REPEATED_DAYS_PATH: FPath = ntf_fpath(&NTF_REPEATED_DAYS);
    pub static ref NTF_EMPTY: NamedTempFile = create_temp_file("");
    pub static ref NTF_EMPTY_PATH: FPath = ntf_fpath(&NTF_EMPTY);
}

/// Date in [`YEAR`].
pub fn ymd(month: u32, day: u32) -> Date {
    NaiveDate::from_ymd_opt(YEAR, month, day).unwrap()
}

pub fn default_pattern() -> DatePattern {
    DatePattern::new(DEFAULT_LOG_LINE_REGEX, DEFAULT_REGEX_GROUP_NB, DEFAULT_LOG_DATE_FORMAT).unwrap()
}

/// helper to wrap the match and panic checks
pub fn new_DateReader(path: &FPath) -> DateReader {
    match DateReader::open(Path::new(path), default_pattern(), YEAR, Logger::silent()) {
        Ok(val) => val,
        Err(err) => {
            panic!("ERROR: DateReader::open({:?}) failed {}", path, err);
        }
    }
}

/// One syslog-style line dated `date`, numbered `n`.
pub fn log_line(date: Date, n: usize) -> String {
    format!(
        "{} {:02}:{:02}:{:02} host message number {}\n",
        date.format("%b %e"),
        (n / 3600) % 24,
        (n / 60) % 60,
        n % 60,
        n,
    )
}

/// A log of `count` lines with non-decreasing dates spread over the whole of
/// [`YEAR`].
pub fn generate_log(count: usize) -> String {
    let mut data = String::with_capacity(count * 48);
    for n in 0..count {
        let ordinal: u32 = 1 + (n * 365 / count) as u32;
        let date = NaiveDate::from_yo_opt(YEAR, ordinal).unwrap();
        data.push_str(log_line(date, n).as_str());
    }

    data
}

/// Start offsets of every line of `data`.
pub fn line_offsets(data: &[u8]) -> Vec<FileOffset> {
    let mut offsets: Vec<FileOffset> = vec![];
    if data.is_empty() {
        return offsets;
    }
    offsets.push(0);
    for (index, byte) in data.iter().enumerate() {
        if *byte == NLu8 && index + 1 < data.len() {
            offsets.push(index as FileOffset + 1);
        }
    }

    offsets
}

/// Resolve the extraction range of `data` for `start`..=`end` with a naive
/// linear scan of every line.
///
/// Only meaningful for logs with non-decreasing dates.
pub fn naive_range(
    data: &[u8],
    start: Date,
    end: Date,
) -> (FileOffset, FileOffset) {
    let pattern = default_pattern();
    let size = data.len() as FileOffset;
    let dated: Vec<(FileOffset, Date)> = line_offsets(data)
        .into_iter()
        .filter_map(|offset| {
            let line_end = match data[offset as usize..].iter().position(|b| *b == NLu8) {
                Some(index) => offset as usize + index + 1,
                None => data.len(),
            };
            pattern
                .parse_date(&data[offset as usize..line_end], YEAR)
                .ok()
                .map(|date| (offset, date))
        })
        .collect();
    let start_offset: FileOffset = dated
        .iter()
        .find(|(_, date)| *date == start)
        .map(|(offset, _)| *offset)
        .unwrap_or(0);
    if !dated
        .iter()
        .any(|(offset, date)| *date == end && *offset >= start_offset)
    {
        return (start_offset, size);
    }
    let end_offset: FileOffset = dated
        .iter()
        .find(|(offset, date)| *offset >= start_offset && *date > end)
        .map(|(offset, _)| *offset - 1)
        .unwrap_or(size);

    (start_offset, end_offset)
}
