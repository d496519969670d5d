// src/data/datetime.rs

//! Functions to perform regular expression ("regex") searches on the bytes of
//! one log line and transform the captured date substring to a chrono
//! [`NaiveDate`].
//!
//! Parsing a line requires:
//! 1. removing NUL bytes and the trailing line separator
//! 2. matching the configured line regex
//! 3. parsing the configured capture group with the configured `strftime`
//!    date format, with the _reference year_ injected
//!
//! The log date formats this crate handles never carry a year (e.g. syslog
//! `Jan  5 10:00:00`), so every parsed date receives the reference year
//! supplied by the caller.
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//! - `regex` crate [Regular Expression syntax].
//!
//! [`NaiveDate`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDate.html
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_camel_case_types)]

use crate::common::{ExtractError, NULu8, ResultExtract};
use crate::properties::Properties;

use std::borrow::Cow;
use std::fmt;

use ::bstr::ByteSlice;
#[doc(hidden)]
pub use ::chrono::{Datelike, Local, NaiveDate};
use ::chrono::format::{Item, Numeric, StrftimeItems};
use ::regex::bytes::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// types and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A _Year_ in a date
pub type Year = i32;

/// A calendar date parsed from a log line or passed by the user.
///
/// Day precision; total-ordered.
pub type Date = NaiveDate;

/// A chrono `strftime` date format string, e.g. `"%b %d"`.
pub type DateFormat_str = str;

/// A regex pattern string for one log line.
pub type LineRegex_str = str;

/// Index of a regex capture group.
pub type CaptureGroupNb = usize;

/// Property name of the log line regex.
pub const PROP_LOG_LINE_REGEX: &str = "log_line_regex";
/// Default log line regex: a leading `"<token> <day-number>"`, a time field,
/// then the rest of the line. The rest may hold any bytes, including invalid
/// UTF-8.
pub const DEFAULT_LOG_LINE_REGEX: &LineRegex_str = r"^(.+?[ \t]+\d+)[ \t]+(\d+:\d+:\d+)[ \t]+((?-u:.*))$";

/// Property name of the capture group holding the date substring.
pub const PROP_REGEX_GROUP_NB: &str = "regex_group_nb";
/// Default capture group holding the date substring.
pub const DEFAULT_REGEX_GROUP_NB: CaptureGroupNb = 1;

/// Property name of the date format applied to the captured substring.
pub const PROP_LOG_DATE_FORMAT: &str = "log_date_format";
/// Default date format, short month name and day, e.g. `"Jan 5"`.
pub const DEFAULT_LOG_DATE_FORMAT: &DateFormat_str = "%b %d";

/// Format of user-passed dates, e.g. `"02/01/2024"`.
pub const REQUESTED_DATE_FORMAT: &DateFormat_str = "%d/%m/%Y";

/// Does the parsed `strftime` item set the year, or all of the date?
fn is_year_item(item: &Item) -> bool {
    matches!(
        item,
        Item::Numeric(
            Numeric::Year
                | Numeric::YearDiv100
                | Numeric::YearMod100
                | Numeric::IsoYear
                | Numeric::IsoYearDiv100
                | Numeric::IsoYearMod100
                | Numeric::Timestamp,
            _
        )
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DatePattern
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The configured shape of a log line: a compiled line regex, the capture
/// group holding the date substring, and the date format for that substring.
///
/// Built once per run and passed explicitly to the readers.
#[derive(Clone)]
pub struct DatePattern {
    regex: Regex,
    group: CaptureGroupNb,
    format: String,
    /// `format` with the injected year specifier prepended.
    format_with_year: String,
}

impl fmt::Debug for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DatePattern")
            .field("regex", &self.regex.as_str())
            .field("group", &self.group)
            .field("format", &self.format)
            .finish()
    }
}

impl DatePattern {
    /// Create a new `DatePattern`.
    ///
    /// Fails with [`ExtractError::BadPattern`] if the regex does not compile,
    /// if it has no capture group `group`, or if `format` is not a usable
    /// year-less `strftime` format.
    pub fn new(
        regex_pattern: &LineRegex_str,
        group: CaptureGroupNb,
        format: &DateFormat_str,
    ) -> ResultExtract<DatePattern> {
        defn!("({:?}, {}, {:?})", regex_pattern, group, format);
        let regex = match Regex::new(regex_pattern) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new failed {}", err);
                return Err(ExtractError::BadPattern {
                    reason: format!("regex {:?}: {}", regex_pattern, err),
                });
            }
        };
        // `captures_len` includes the implicit group 0
        if group >= regex.captures_len() {
            defx!("group {} >= captures_len {}", group, regex.captures_len());
            return Err(ExtractError::BadPattern {
                reason: format!(
                    "regex {:?} has no capture group {} (it has {})",
                    regex_pattern,
                    group,
                    regex.captures_len() - 1,
                ),
            });
        }
        if format.trim().is_empty() {
            defx!("empty format");
            return Err(ExtractError::BadPattern {
                reason: String::from("date format is empty"),
            });
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            defx!("format {:?} has an invalid specifier", format);
            return Err(ExtractError::BadPattern {
                reason: format!("date format {:?} has an invalid specifier", format),
            });
        }
        if let Some(item) = StrftimeItems::new(format).find(is_year_item) {
            defx!("format {:?} has year item {:?}", format, item);
            return Err(ExtractError::BadPattern {
                reason: format!(
                    "date format {:?} must not contain a year ({:?}); the year is passed separately",
                    format, item
                ),
            });
        }
        let dp = DatePattern {
            regex,
            group,
            format: String::from(format),
            format_with_year: format!("%Y {}", format),
        };
        defx!("return {:?}", dp);

        Ok(dp)
    }

    /// Create a `DatePattern` from the properties
    /// [`PROP_LOG_LINE_REGEX`], [`PROP_REGEX_GROUP_NB`], and
    /// [`PROP_LOG_DATE_FORMAT`], each falling back to its `DEFAULT_` value.
    pub fn from_properties(properties: &Properties) -> ResultExtract<DatePattern> {
        let regex_pattern: String = properties.get_str(PROP_LOG_LINE_REGEX, DEFAULT_LOG_LINE_REGEX)?;
        let group: CaptureGroupNb = properties.get_usize(PROP_REGEX_GROUP_NB, DEFAULT_REGEX_GROUP_NB)?;
        let format: String = properties.get_str(PROP_LOG_DATE_FORMAT, DEFAULT_LOG_DATE_FORMAT)?;

        DatePattern::new(regex_pattern.as_str(), group, format.as_str())
    }

    pub fn regex_str(&self) -> &str {
        self.regex.as_str()
    }

    pub const fn group(&self) -> CaptureGroupNb {
        self.group
    }

    pub fn format(&self) -> &DateFormat_str {
        self.format.as_str()
    }

    /// Extract the [`Date`] of one `line`, injecting `year`.
    ///
    /// `line` may include its trailing `'\n'` (or `"\r\n"`). NUL bytes
    /// anywhere in the line are removed before matching.
    ///
    /// Fails with [`ExtractError::UnknownLogFormat`] if the line does not
    /// match, if the capture group did not participate in the match, or if
    /// the captured substring is not a valid date for `year`
    /// (e.g. `Feb 29` in a non-leap year).
    pub fn parse_date(&self, line: &[u8], year: Year) -> ResultExtract<Date> {
        let line: Cow<[u8]> = strip_line(line);
        let captures = match self.regex.captures(&line) {
            Some(val) => val,
            None => {
                defñ!("no regex match");
                return Err(unknown_log_format(&line));
            }
        };
        let match_ = match captures.get(self.group) {
            Some(val) => val,
            None => {
                defñ!("group {} did not participate", self.group);
                return Err(unknown_log_format(&line));
            }
        };
        let captured: &str = match std::str::from_utf8(match_.as_bytes()) {
            Ok(val) => val,
            Err(_err) => {
                defñ!("captured bytes are not UTF-8: {}", _err);
                return Err(unknown_log_format(&line));
            }
        };
        // inject the year by prepending it to both data and format
        let data: String = format!("{} {}", year, captured.trim());
        match NaiveDate::parse_from_str(data.as_str(), self.format_with_year.as_str()) {
            Ok(date) => {
                debug_assert_eq!(date.year(), year, "injected year was not kept");
                Ok(date)
            }
            Err(_err) => {
                defñ!("NaiveDate::parse_from_str({:?}, {:?}) failed {}", data, self.format_with_year, _err);
                Err(unknown_log_format(&line))
            }
        }
    }
}

/// Extract the [`Date`] of one `line` with `pattern`, injecting
/// `reference_year`.
///
/// See [`DatePattern::parse_date`].
pub fn parse_date(line: &[u8], pattern: &DatePattern, reference_year: Year) -> ResultExtract<Date> {
    pattern.parse_date(line, reference_year)
}

/// The current year in the local timezone; the default reference year.
pub fn current_year() -> Year {
    Local::now().year()
}

/// Parse a user-passed date in [`REQUESTED_DATE_FORMAT`] (`DD/MM/YYYY`).
pub fn parse_requested_date(value: &str) -> ResultExtract<Date> {
    match NaiveDate::parse_from_str(value.trim(), REQUESTED_DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(err) => Err(ExtractError::BadRequestedDate {
            value: String::from(value),
            reason: format!("expected DD/MM/YYYY: {}", err),
        }),
    }
}

/// Remove NUL bytes and the trailing line separator (`"\n"` or `"\r\n"`).
fn strip_line(line: &[u8]) -> Cow<[u8]> {
    let line: &[u8] = line.trim_end_with(|c| c == '\n' || c == '\r');
    if ::memchr::memchr(NULu8, line).is_none() {
        return Cow::Borrowed(line);
    }

    Cow::Owned(
        line.iter()
            .copied()
            .filter(|b| *b != NULu8)
            .collect(),
    )
}

fn unknown_log_format(line: &[u8]) -> ExtractError {
    ExtractError::UnknownLogFormat {
        line: line.to_str_lossy().into_owned(),
    }
}
