// src/data/mod.rs

//! The `data` module is small data containers passed between the
//! [readers]: parsed dates, date anchors, boundaries, and byte ranges.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is a sequence of bytes in a file that:
//!
//! * begins at offset `0` or immediately after a `'\n'` byte
//!   (a _line start offset_).
//! * ends with a `'\n'` byte or the end of the file.
//!
//! Lines are found by a [`LogSource`].
//!
//! ### Anchor
//!
//! A [`DateAnchor`] is a line that matched the configured [`DatePattern`]:
//! its line start offset together with its parsed [`Date`].
//! Anchors are found by a [`DateReader`].
//!
//! ### Reference year
//!
//! The log date formats handled never carry a year. The externally supplied
//! _reference year_ is injected into every parsed date.
//!
//! [readers]: crate::readers
//! [`LogSource`]: crate::readers::linereader::LogSource
//! [`DateReader`]: crate::readers::datereader::DateReader
//! [`DateAnchor`]: crate::data::anchor::DateAnchor
//! [`DatePattern`]: crate::data::datetime::DatePattern
//! [`Date`]: crate::data::datetime::Date

pub mod anchor;
pub mod datetime;
pub mod range;
