//! Header row extraction

use crate::cell::{CellAddress, CellValue};
use crate::error::Result;
use crate::inspect::SheetSource;

/// Column headers taken from the first row
///
/// A blank header cell is named after its column letter instead.
pub fn headers<S: SheetSource + ?Sized>(sheet: &S) -> Result<Vec<String>> {
    if sheet.max_row() == 0 {
        return Ok(Vec::new());
    }

    (1..=sheet.max_column())
        .map(|col| {
            let cell = sheet.cell_at(1, col)?;
            let text = match cell.value {
                CellValue::Null => String::new(),
                value => value.to_string(),
            };
            Ok(if text.trim().is_empty() {
                CellAddress::column_to_letters(col)
            } else {
                text
            })
        })
        .collect()
}
