//! # cellscope-xlsx
//!
//! XLSX (Office Open XML) reader for cellscope.
//!
//! Cells are loaded as-is: formulas keep their text, cached results are kept
//! alongside, and the used range includes empty cells that carry only a style.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
