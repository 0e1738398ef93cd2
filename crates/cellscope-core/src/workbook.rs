//! Workbook type - the loaded document

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;

/// A workbook (spreadsheet document)
///
/// Holds the worksheets a loader read, in file order, and which one is
/// active. Inspection only ever consults the active sheet.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Active sheet index
    active_sheet: usize,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a workbook holding a single worksheet
    pub fn from_worksheet(worksheet: Worksheet) -> Self {
        Self {
            worksheets: vec![worksheet],
            active_sheet: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|s| s.name() == name)
    }

    /// Get the index of a sheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|s| s.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append a worksheet, returning its index
    pub fn add_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        if self.sheet_index(worksheet.name()).is_some() {
            return Err(Error::other(format!(
                "Sheet name already exists: {}",
                worksheet.name()
            )));
        }
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    /// Get the active sheet index
    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    /// Set the active sheet index
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// Make the named sheet active
    pub fn select_sheet(&mut self, name: &str) -> Result<()> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        self.active_sheet = index;
        Ok(())
    }

    /// The active worksheet
    pub fn active_worksheet(&self) -> Result<&Worksheet> {
        if self.worksheets.is_empty() {
            return Err(Error::NoWorksheets);
        }
        self.worksheets
            .get(self.active_sheet)
            .ok_or(Error::SheetOutOfBounds(self.active_sheet, self.worksheets.len()))
    }
}
