// src/lib.rs

//! Extract a date range from very large, roughly time-ordered text logs
//! without reading them into memory.
//!
//! _llxlib_ binary searches a log file by date using seeks, then refines
//! the found boundaries line by line, tolerating lines that do not parse.
//! The resolved byte range is copied verbatim.
//!
//! The _llx_ binary program is the command-line driver, see
//! `src/bin/llx.rs`.
//!
//! Also see [_Overview of readers_] and [_Definitions of data_].
//!
//! [_Overview of readers_]: crate::readers
//! [_Definitions of data_]: crate::data

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod properties;
pub mod readers;
#[cfg(test)]
pub mod tests;
