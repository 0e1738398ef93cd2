//! # cellscope-csv
//!
//! CSV reader for cellscope. A CSV file becomes a single-sheet workbook.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
