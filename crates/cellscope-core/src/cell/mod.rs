//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The dynamically typed scalar stored in a cell
//! - [`TypeTag`] - The type of a cell's stored content
//! - [`CellContent`] - Literal or formula, as decided by a loader
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;
mod content;
mod value;

pub use address::CellAddress;
pub use content::{Cell, CellContent, FORMULA_MARKER};
pub use value::{CellError, CellValue, TypeTag};
