// src/debug/mod.rs

//! Printer macros for debug builds, and temporary-file helpers for tests.

#[cfg(test)]
pub mod helpers;

pub mod printers;
