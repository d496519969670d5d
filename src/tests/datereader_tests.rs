// src/tests/datereader_tests.rs

//! tests for `datereader.rs`

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use crate::common::{ExtractError, FPath, FileOffset};
use crate::data::anchor::{DateAnchor, Direction};
use crate::data::datetime::Date;
use crate::data::range::SearchWindow;
use crate::debug::helpers::{create_temp_file, ntf_fpath};
use crate::tests::common::{
    generate_log,
    line_offsets,
    new_DateReader,
    ymd,
    GARBAGE_EDGES,
    NTF_EMPTY_PATH,
    NTF_FIVE_DAYS_PATH,
    NTF_GARBAGE_EDGES_PATH,
    NTF_REPEATED_DAYS_PATH,
    NTF_WITH_GARBAGE_PATH,
    REPEATED_DAYS,
};

use ::more_asserts::{assert_ge, assert_lt};
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// find_known_date
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(0, Direction::Backward, 0, 20, 1; "first line backward")]
#[test_case(0, Direction::Forward, 0, 20, 1; "first line forward")]
#[test_case(20, Direction::Backward, 0, 20, 1; "garbage backward")]
#[test_case(20, Direction::Forward, 41, 61, 2; "garbage forward")]
#[test_case(61, Direction::Forward, 61, 81, 3; "last line")]
fn test_find_known_date_WITH_GARBAGE(
    offset: FileOffset,
    direction: Direction,
    line_offset: FileOffset,
    next_offset: FileOffset,
    day: u32,
) {
    let mut reader = new_DateReader(&NTF_WITH_GARBAGE_PATH);
    let anchor = reader.find_known_date(offset, direction).unwrap();
    assert_eq!(
        anchor,
        DateAnchor {
            date: ymd(1, day),
            line_offset,
            next_offset,
        }
    );
}

#[test]
fn test_find_known_date_start_of_file() {
    let mut reader = new_DateReader(&NTF_GARBAGE_EDGES_PATH);
    // second garbage line
    let offset: FileOffset = GARBAGE_EDGES.find("more").unwrap() as FileOffset;
    match reader.find_known_date(offset, Direction::Backward) {
        Err(ExtractError::FormatAtStartOfFile) => {}
        result => panic!("expected FormatAtStartOfFile, got {:?}", result),
    }
}

#[test]
fn test_find_known_date_end_of_file() {
    let mut reader = new_DateReader(&NTF_GARBAGE_EDGES_PATH);
    let offset: FileOffset = GARBAGE_EDGES.find("trailing").unwrap() as FileOffset;
    match reader.find_known_date(offset, Direction::Forward) {
        Err(ExtractError::FormatAtEndOfFile) => {}
        result => panic!("expected FormatAtEndOfFile, got {:?}", result),
    }
}

#[test]
fn test_find_known_date_empty_file() {
    let mut reader = new_DateReader(&NTF_EMPTY_PATH);
    let result = reader.find_known_date(0, Direction::Backward);
    assert!(matches!(result, Err(ExtractError::FormatAtStartOfFile)), "got {:?}", result);
    let result = reader.find_known_date(0, Direction::Forward);
    assert!(matches!(result, Err(ExtractError::FormatAtEndOfFile)), "got {:?}", result);
}

/// backward from the start-of-file garbage falls back to forward
#[test]
fn test_find_known_date_either() {
    let mut reader = new_DateReader(&NTF_GARBAGE_EDGES_PATH);
    let offset: FileOffset = GARBAGE_EDGES.find("more").unwrap() as FileOffset;
    let anchor = reader.find_known_date_either(offset, Direction::Backward).unwrap();
    assert_eq!(anchor.date, ymd(1, 2));
    assert_eq!(anchor.line_offset, GARBAGE_EDGES.find("Jan 2").unwrap() as FileOffset);

    let offset: FileOffset = GARBAGE_EDGES.find("trailing").unwrap() as FileOffset;
    let anchor = reader.find_known_date_either(offset, Direction::Forward).unwrap();
    assert_eq!(anchor.date, ymd(1, 3));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// locate_near
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(1, 0)]
#[test_case(2, 20)]
#[test_case(3, 40)]
#[test_case(4, 60)]
#[test_case(5, 80)]
fn test_locate_near_FIVE_DAYS(day: u32, expected: FileOffset) {
    let mut reader = new_DateReader(&NTF_FIVE_DAYS_PATH);
    let window = SearchWindow::new(0, reader.filesz());
    let offset = reader.locate_near(window, ymd(1, day)).unwrap();
    assert_eq!(offset, expected);
}

/// the returned line carries the target date, and is some line of that date
#[test_case(1)]
#[test_case(3)]
#[test_case(4)]
#[test_case(7)]
#[test_case(9)]
fn test_locate_near_REPEATED_DAYS(day: u32) {
    let mut reader = new_DateReader(&NTF_REPEATED_DAYS_PATH);
    let window = SearchWindow::new(0, reader.filesz());
    let offset = reader.locate_near(window, ymd(1, day)).unwrap();
    assert!(
        line_offsets(REPEATED_DAYS.as_bytes()).contains(&offset),
        "{} is not a line start", offset
    );
    let anchor = reader.date_at(offset).unwrap();
    assert_eq!(anchor.date, ymd(1, day));
}

#[test_case(&NTF_FIVE_DAYS_PATH, ymd(12, 31); "after last")]
#[test_case(&NTF_FIVE_DAYS_PATH, Date::from_ymd_opt(2023, 12, 31).unwrap(); "before first")]
#[test_case(&NTF_REPEATED_DAYS_PATH, ymd(1, 2); "missing day between")]
#[test_case(&NTF_REPEATED_DAYS_PATH, ymd(1, 8); "missing day late")]
fn test_locate_near_DateNotFound(path: &FPath, date: Date) {
    let mut reader = new_DateReader(path);
    let window = SearchWindow::new(0, reader.filesz());
    match reader.locate_near(window, date) {
        Err(ExtractError::DateNotFound { date: date_ }) => assert_eq!(date_, date),
        result => panic!("expected DateNotFound, got {:?}", result),
    }
}

#[test]
fn test_locate_near_empty_window() {
    let mut reader = new_DateReader(&NTF_FIVE_DAYS_PATH);
    let result = reader.locate_near(SearchWindow::new(40, 40), ymd(1, 3));
    assert!(result.unwrap_err().is_date_not_found());
    let mut reader = new_DateReader(&NTF_EMPTY_PATH);
    let result = reader.locate_near(SearchWindow::new(0, 0), ymd(1, 3));
    assert!(result.unwrap_err().is_date_not_found());
}

/// a window starting after the target date cannot find it
#[test]
fn test_locate_near_window_after_date() {
    let mut reader = new_DateReader(&NTF_FIVE_DAYS_PATH);
    let window = SearchWindow::new(40, reader.filesz());
    let result = reader.locate_near(window, ymd(1, 2));
    assert!(result.unwrap_err().is_date_not_found());
}

#[test]
fn test_locate_near_WITH_GARBAGE() {
    let mut reader = new_DateReader(&NTF_WITH_GARBAGE_PATH);
    let window = SearchWindow::new(0, reader.filesz());
    let offset = reader.locate_near(window, ymd(1, 2)).unwrap();
    assert_eq!(offset, 41);
}

/// garbage at the start of the file is resolved forward
#[test]
fn test_locate_near_GARBAGE_EDGES() {
    let mut reader = new_DateReader(&NTF_GARBAGE_EDGES_PATH);
    let window = SearchWindow::new(0, reader.filesz());
    let offset = reader.locate_near(window, ymd(1, 2)).unwrap();
    let anchor = reader.find_known_date(offset, Direction::Forward).unwrap();
    assert_eq!(anchor.date, ymd(1, 2));
}

/// every date of a large generated log is found with far fewer line reads and
/// bytes than a linear scan
#[test]
fn test_locate_near_sublinear() {
    let data: String = generate_log(20_000);
    let ntf = create_temp_file(data.as_str());
    let path = ntf_fpath(&ntf);
    for (month, day) in [(1, 1), (3, 15), (7, 4), (12, 30)] {
        let mut reader = new_DateReader(&path);
        let filesz = reader.filesz();
        let offset = reader.locate_near(SearchWindow::new(0, filesz), ymd(month, day)).unwrap();
        assert_eq!(reader.date_at(offset).unwrap().date, ymd(month, day));
        let source = reader.source();
        assert_lt!(source.count_lines_read(), 100, "too many lines read for {}/{}", month, day);
        assert_lt!(
            source.count_bytes_scanned_backward(),
            filesz / 4,
            "too many bytes scanned for {}/{}", month, day
        );
        assert_ge!(source.count_seeks(), 1);
    }
}
