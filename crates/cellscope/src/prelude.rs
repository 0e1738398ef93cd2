//! Prelude module - common imports for cellscope users
//!
//! ```rust
//! use cellscope::prelude::*;
//! ```

pub use crate::{
    // Inspection
    check_formulas,
    diff_sheets,
    headers,
    inspect,
    preview_rows,
    row_lines,

    // Cell types
    CellAddress,
    CellDescriptor,
    CellValue,
    FormulaMarkerAnomaly,
    TypeTag,

    // Error types
    Error,
    LoadError,
    Result,

    // Main types
    LoadOptions,
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
