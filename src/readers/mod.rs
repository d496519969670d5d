// src/readers/mod.rs

//! "Readers" for _llxlib_.
//!
//! ## Overview of readers
//!
//! * A [`LogExtractor`] drives a [`DateReader`] to resolve an
//!   [`ExtractionRange`], then copies it with [`extract_between_offsets`].
//! * A `DateReader` drives a [`LogSource`] to derive [`DateAnchor`s]; it
//!   binary searches by date and refines boundaries line by line.
//! * A `LogSource` reads lines and finds line starts.
//!
//! <br/>
//!
//! * A `LogSource` only handles `u8` bytes.
//! * A `DateReader` converts to `char` only for the date substring captured
//!   from a single line.
//!
//! <br/>
//!
//! The _llx_ binary program uses one [`LogExtractor`] per run.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`DateAnchor`s]: crate::data::anchor::DateAnchor
//! [`ExtractionRange`]: crate::data::range::ExtractionRange
//! [`LogSource`]: crate::readers::linereader::LogSource
//! [`DateReader`]: crate::readers::datereader::DateReader
//! [`LogExtractor`]: crate::readers::logextractor::LogExtractor
//! [`extract_between_offsets`]: crate::readers::rangeextractor::extract_between_offsets

pub mod datereader;
pub mod helpers;
pub mod linereader;
pub mod logextractor;
pub mod rangeextractor;
pub mod refiner;
