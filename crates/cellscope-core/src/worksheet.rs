//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellContent, CellValue};
use crate::error::{Error, Result};
use crate::inspect::SheetSource;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely, row-major: `BTreeMap<row, BTreeMap<col, CellContent>>`.
/// The extent (`max_row`, `max_column`) is tracked separately from the stored
/// cells, so a loader can report cells that exist in the file but hold nothing.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Row index → column map (1-based)
    rows: BTreeMap<u32, BTreeMap<u32, CellContent>>,
    /// Highest row mentioned by the source
    max_row: u32,
    /// Highest column mentioned by the source
    max_col: u32,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest row in the sheet's extent (0 for an empty sheet)
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Highest column in the sheet's extent (0 for an empty sheet)
    pub fn max_column(&self) -> u32 {
        self.max_col
    }

    // === Cell Access ===

    /// Get the stored content at 1-based indices
    pub fn content_at(&self, row: u32, col: u32) -> Option<&CellContent> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get the stored content by address string (e.g., "A1")
    pub fn content(&self, address: &str) -> Result<Option<&CellContent>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.content_at(addr.row, addr.col))
    }

    /// Get the value a reader sees at an address (cached result for formulas)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        Ok(self
            .content(address)?
            .map(|c| c.value().clone())
            .unwrap_or_default())
    }

    /// Read a cell within the sheet's extent
    ///
    /// Positions inside the extent without stored content read as null.
    /// Positions outside it are an error, never clamped.
    pub fn cell_at(&self, row: u32, col: u32) -> Result<Cell> {
        if row == 0 || row > self.max_row {
            return Err(Error::RowOutOfBounds(row, self.max_row));
        }
        if col == 0 || col > self.max_col {
            return Err(Error::ColumnOutOfBounds(col, self.max_col));
        }
        Ok(self
            .content_at(row, col)
            .map(Cell::from)
            .unwrap_or_else(Cell::null))
    }

    // === Cell Mutation (used by loaders) ===

    /// Store content at 1-based indices, growing the extent to cover it
    pub fn set_content_at(&mut self, row: u32, col: u32, content: CellContent) -> Result<()> {
        self.touch(row, col)?;
        if content.is_null() {
            if let Some(cells) = self.rows.get_mut(&row) {
                cells.remove(&col);
            }
        } else {
            self.rows.entry(row).or_default().insert(col, content);
        }
        Ok(())
    }

    /// Store a literal value at 1-based indices
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u32, value: V) -> Result<()> {
        self.set_content_at(row, col, CellContent::Literal(value.into()))
    }

    /// Store a formula (without cached result) at 1-based indices
    pub fn set_formula_at(&mut self, row: u32, col: u32, text: &str) -> Result<()> {
        self.set_content_at(row, col, CellContent::formula(text))
    }

    /// Store a literal value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value)
    }

    /// Store a formula by address string
    pub fn set_cell_formula(&mut self, address: &str, text: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_formula_at(addr.row, addr.col, text)
    }

    /// Grow the extent to include a position without storing anything
    pub fn touch(&mut self, row: u32, col: u32) -> Result<()> {
        Self::validate_cell_position(row, col)?;
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        Ok(())
    }

    fn validate_cell_position(row: u32, col: u32) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        Ok(())
    }

    // === Iteration ===

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if the worksheet has an empty extent
    pub fn is_empty(&self) -> bool {
        self.max_row == 0 || self.max_col == 0
    }

    /// Iterate over stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &CellContent)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, content)| (row, col, content)))
    }

    /// Iterate over all formula cells: (row, col, formula_text)
    pub fn formula_cells(&self) -> impl Iterator<Item = (u32, u32, &str)> {
        self.iter_cells()
            .filter_map(|(row, col, content)| content.formula_text().map(|text| (row, col, text)))
    }
}

impl SheetSource for Worksheet {
    fn max_row(&self) -> u32 {
        self.max_row
    }

    fn max_column(&self) -> u32 {
        self.max_col
    }

    fn cell_at(&self, row: u32, col: u32) -> Result<Cell> {
        Worksheet::cell_at(self, row, col)
    }
}
