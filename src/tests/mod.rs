// src/tests/mod.rs

//! Tests for _llxlib_.
//!
//! Tests are placed at `src/tests/`, inside the `llxlib`, for access to
//! crate-internal readers and their counters.
//!
//! Tests of the `llx` program as a whole are at top-level path `tests/`.

pub mod common;
pub mod datereader_tests;
