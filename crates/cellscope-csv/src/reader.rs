//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use cellscope_core::{CellContent, CellValue, Workbook, Worksheet, FORMULA_MARKER};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a single-sheet workbook
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let path = path.as_ref();
        log::debug!("reading CSV {}", path.display());
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a single-sheet workbook
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Workbook> {
        Ok(Workbook::from_worksheet(Self::read_worksheet(
            reader, options,
        )?))
    }

    /// Read CSV from a reader into a worksheet
    pub fn read_worksheet<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        // Header handling is done here so the header row lands in row 1 like any other.
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());

        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = idx as u32 + 1;
            let is_header = options.has_header && row == 1;

            for (col, field) in record.iter().enumerate() {
                let content = if is_header {
                    CellContent::Literal(Self::header_value(field))
                } else {
                    Self::field_content(field, options)
                };
                worksheet.set_content_at(row, col as u32 + 1, content)?;
            }
        }

        log::debug!(
            "read {} rows x {} columns from CSV",
            worksheet.max_row(),
            worksheet.max_column()
        );
        Ok(worksheet)
    }

    fn header_value(field: &str) -> CellValue {
        if field.is_empty() {
            CellValue::Null
        } else {
            CellValue::text(field)
        }
    }

    fn field_content(field: &str, options: &CsvReadOptions) -> CellContent {
        if options.detect_formulas
            && field.starts_with(FORMULA_MARKER)
            && field.len() > FORMULA_MARKER.len_utf8()
        {
            // Kept verbatim; a doubled marker is for validation to report
            return CellContent::formula(field);
        }

        let value = if options.auto_detect_types {
            Self::detect_type(field)
        } else if field.is_empty() {
            CellValue::Null
        } else {
            CellValue::text(field)
        };
        CellContent::Literal(value)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let field = field.trim();

        if field.is_empty() {
            return CellValue::Null;
        }

        if field.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if field.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // "nan" and "inf" parse as f64 but are text in a spreadsheet
        match field.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::text(field),
        }
    }
}
