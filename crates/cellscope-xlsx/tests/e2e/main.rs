//! End-to-end tests for cellscope-xlsx.
//!
//! Each test assembles the exact package it needs with `XlsxFixture`, writes
//! it to a temp file, then reads it back with `XlsxReader` and asserts on the
//! loaded cells.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
