// src/printer/mod.rs

//! The `printer` module is for printing user-facing progress and warning
//! messages with leveled tags and color.

pub mod logger;
