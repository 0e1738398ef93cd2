//! # cellscope-core
//!
//! Core data structures and cell inspection for cellscope.
//!
//! This crate provides:
//! - [`CellValue`], [`TypeTag`], [`CellContent`] - what a cell holds
//! - [`CellAddress`] - A1-style addressing and column letters
//! - [`Workbook`], [`Worksheet`] - the loaded document
//! - [`inspect`] / [`preview_rows`] - canonical, row-major cell descriptors
//! - [`check_formulas`] - formula marker validation
//! - [`diff_descriptors`] - cell-level comparison of two sheets
//!
//! ## Example
//!
//! ```rust
//! use cellscope_core::{inspect, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("A1", "Value1").unwrap();
//! sheet.set_cell_value("A2", 10).unwrap();
//! sheet.set_cell_formula("B2", "=A2*2").unwrap();
//!
//! let descriptors = inspect(&sheet).unwrap();
//! assert_eq!(descriptors.len(), 4);
//! assert_eq!(descriptors[2].to_string(), "A2: val=10, type=number");
//! assert_eq!(descriptors[3].formula.as_deref(), Some("=A2*2"));
//! ```

pub mod cell;
pub mod diff;
pub mod error;
pub mod headers;
pub mod inspect;
pub mod validate;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellContent, CellError, CellValue, TypeTag, FORMULA_MARKER};
pub use diff::{diff_descriptors, diff_sheets, CellChange, ChangeKind, SheetDiff};
pub use error::{Error, Result};
pub use headers::headers;
pub use inspect::{inspect, preview_rows, row_lines, CellDescriptor, PreviewRow, RowLine, SheetSource};
pub use validate::{check_formulas, FormulaFinding, FormulaMarkerAnomaly};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;
