//! Load error type

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loading workbooks
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading a workbook
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file at the given path
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Extension not handled by any reader
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// XLSX reader error
    #[error(transparent)]
    Xlsx(#[from] cellscope_xlsx::XlsxError),

    /// CSV reader error
    #[error(transparent)]
    Csv(#[from] cellscope_csv::CsvError),

    /// Core error (e.g. the requested sheet does not exist)
    #[error(transparent)]
    Core(#[from] cellscope_core::Error),
}
