//! # cellscope
//!
//! Inspect the cells of a spreadsheet: each cell's reference, value, type and
//! formula text, in a canonical row-major order.
//!
//! ## Features
//!
//! - Read XLSX/XLSM files (Office Open XML)
//! - Read CSV and TSV files with type detection
//! - Describe every cell of the active sheet ([`inspect`])
//! - Preview the first rows as value tuples ([`preview_rows`])
//! - Flag malformed formula markers such as `==SUM(...)` ([`check_formulas`])
//! - Compare an original sheet with a modified one ([`diff_sheets`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use cellscope::prelude::*;
//!
//! let workbook = cellscope::load("data.xlsx").unwrap();
//! let sheet = workbook.active_worksheet().unwrap();
//!
//! for line in row_lines(&inspect(sheet).unwrap()) {
//!     println!("  {}", line);
//! }
//! ```

mod error;
mod options;
pub mod prelude;

pub use error::{LoadError, LoadResult};
pub use options::LoadOptions;

// Re-export core types
pub use cellscope_core::{
    check_formulas, diff_descriptors, diff_sheets, headers, inspect, preview_rows, row_lines,
    Cell, CellAddress, CellChange, CellContent, CellDescriptor, CellError, CellValue, ChangeKind,
    Error, FormulaFinding, FormulaMarkerAnomaly, PreviewRow, Result, RowLine, SheetDiff,
    SheetSource, TypeTag, Workbook, Worksheet, FORMULA_MARKER, MAX_COLS, MAX_ROWS,
};

// Re-export I/O types
pub use cellscope_csv::{CsvError, CsvReadOptions, CsvReader};
pub use cellscope_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

/// File formats [`load`] can read, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Csv,
    Tsv,
}

impl FileFormat {
    /// Pick the format from a path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Some(FileFormat::Xlsx),
            Some("csv") => Some(FileFormat::Csv),
            Some("tsv") => Some(FileFormat::Tsv),
            _ => None,
        }
    }
}

/// Load a workbook with default options
pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Workbook> {
    load_with_options(path, &LoadOptions::default())
}

/// Load a workbook, dispatching on the file extension
///
/// Each call reads the file once; nothing is cached between calls.
pub fn load_with_options<P: AsRef<Path>>(path: P, options: &LoadOptions) -> LoadResult<Workbook> {
    let path = path.as_ref();

    let format =
        FileFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.into()))?;
    if !path.is_file() {
        return Err(LoadError::NotFound(path.into()));
    }

    log::debug!("loading {} as {:?}", path.display(), format);
    let mut workbook = match format {
        FileFormat::Xlsx => XlsxReader::read_file(path)?,
        FileFormat::Csv | FileFormat::Tsv => {
            let mut csv = options.csv.clone();
            if format == FileFormat::Tsv {
                csv.delimiter = b'\t';
            }
            if let Some(delimiter) = options.delimiter {
                csv.delimiter = delimiter;
            }
            CsvReader::read_file(path, &csv)?
        }
    };

    if let Some(name) = &options.sheet {
        workbook.select_sheet(name)?;
    }

    Ok(workbook)
}

/// Extension trait for Workbook to add file loading
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> LoadResult<Workbook>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> LoadResult<Workbook> {
        load(path)
    }
}
