//! Cell inspection
//!
//! [`inspect`] walks a sheet row by row and produces one [`CellDescriptor`]
//! per position in the sheet's extent. Descriptors are the canonical form
//! used for printing and for comparing an original workbook with a modified
//! one. [`preview_rows`] is the abbreviated, values-only variant.

use std::fmt;

use crate::cell::{Cell, CellAddress, CellValue, TypeTag};
use crate::error::Result;
use crate::validate::FormulaMarkerAnomaly;

/// A readable grid of cells with a reported extent
///
/// `cell_at` is only called with `1..=max_row()` × `1..=max_column()`;
/// any error it returns is passed through unchanged.
pub trait SheetSource {
    /// Highest row in the extent (0 when empty)
    fn max_row(&self) -> u32;

    /// Highest column in the extent (0 when empty)
    fn max_column(&self) -> u32;

    /// Read one cell (1-based indices)
    fn cell_at(&self, row: u32, col: u32) -> Result<Cell>;
}

impl<S: SheetSource + ?Sized> SheetSource for &S {
    fn max_row(&self) -> u32 {
        (**self).max_row()
    }

    fn max_column(&self) -> u32 {
        (**self).max_column()
    }

    fn cell_at(&self, row: u32, col: u32) -> Result<Cell> {
        (**self).cell_at(row, col)
    }
}

/// Canonical description of one cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellDescriptor {
    /// A1-style reference
    pub reference: String,
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based)
    pub column: u32,
    /// Literal value, or a formula's cached result
    pub value: CellValue,
    /// Type of the stored content
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_tag: TypeTag,
    /// Formula text, only for formula content
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub formula: Option<String>,
    /// Marker problem found in `formula`, if any
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub anomaly: Option<FormulaMarkerAnomaly>,
}

impl CellDescriptor {
    /// Build the descriptor for a cell read at (row, col)
    pub fn new(row: u32, column: u32, cell: Cell) -> Self {
        let anomaly = cell
            .formula
            .as_deref()
            .and_then(FormulaMarkerAnomaly::detect);
        Self {
            reference: CellAddress::new(row, column).to_a1_string(),
            row,
            column,
            value: cell.value,
            type_tag: cell.type_tag,
            formula: cell.formula,
            anomaly,
        }
    }

    /// Address of the described cell
    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.column)
    }

    /// Whether the cell has no value and no formula
    pub fn is_blank(&self) -> bool {
        self.value.is_null() && self.formula.is_none()
    }
}

impl fmt::Display for CellDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: val={}, type={}", self.reference, self.value, self.type_tag)?;
        if let Some(formula) = &self.formula {
            write!(f, ", formula={}", formula)?;
        }
        if let Some(anomaly) = &self.anomaly {
            write!(f, ", anomaly={}", anomaly)?;
        }
        Ok(())
    }
}

/// Upper bound on the descriptors reserved before inspection starts
const MAX_RESERVED_DESCRIPTORS: usize = 1 << 16;

/// Describe every cell in the sheet's extent, row-major
///
/// An empty extent yields an empty vector. The first accessor error aborts
/// inspection and is returned as-is.
pub fn inspect<S: SheetSource + ?Sized>(sheet: &S) -> Result<Vec<CellDescriptor>> {
    let max_row = sheet.max_row();
    let max_col = sheet.max_column();
    if max_row == 0 || max_col == 0 {
        return Ok(Vec::new());
    }

    // A single far-off cell can make the extent huge; reserve a bounded amount
    let extent = (max_row as usize).saturating_mul(max_col as usize);
    let mut descriptors = Vec::with_capacity(extent.min(MAX_RESERVED_DESCRIPTORS));
    for row in 1..=max_row {
        for col in 1..=max_col {
            let cell = sheet.cell_at(row, col)?;
            descriptors.push(CellDescriptor::new(row, col, cell));
        }
    }

    log::debug!(
        "inspected {} cells ({} rows x {} columns)",
        descriptors.len(),
        max_row,
        max_col
    );
    Ok(descriptors)
}

/// Values of the first `limit` rows, one tuple per row
///
/// Rows are bounded by the sheet's own row count, not by `limit`.
pub fn preview_rows<S: SheetSource + ?Sized>(sheet: &S, limit: usize) -> Result<Vec<Vec<CellValue>>> {
    let max_col = sheet.max_column();
    if max_col == 0 {
        return Ok(Vec::new());
    }
    let last_row = u64::from(sheet.max_row()).min(limit as u64) as u32;

    let mut rows = Vec::with_capacity(last_row as usize);
    for row in 1..=last_row {
        let values = (1..=max_col)
            .map(|col| sheet.cell_at(row, col).map(|cell| cell.value))
            .collect::<Result<Vec<_>>>()?;
        rows.push(values);
    }
    Ok(rows)
}

/// One row of descriptors, rendered as `Row <n>: <cell> | <cell> | ...`
#[derive(Debug, Clone, Copy)]
pub struct RowLine<'a> {
    pub row: u32,
    pub cells: &'a [CellDescriptor],
}

impl fmt::Display for RowLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: ", self.row)?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Group row-major descriptors into per-row lines
pub fn row_lines(descriptors: &[CellDescriptor]) -> Vec<RowLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    while start < descriptors.len() {
        let row = descriptors[start].row;
        let len = descriptors[start..]
            .iter()
            .take_while(|d| d.row == row)
            .count();
        lines.push(RowLine {
            row,
            cells: &descriptors[start..start + len],
        });
        start += len;
    }
    lines
}

/// A preview tuple, rendered as `(Item1, 10, 20)`
#[derive(Debug, Clone, Copy)]
pub struct PreviewRow<'a>(pub &'a [CellValue]);

impl fmt::Display for PreviewRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(")")
    }
}
