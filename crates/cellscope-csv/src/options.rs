//! CSV options

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Whether first row is header (kept as text, never type-detected)
    pub has_header: bool,
    /// Automatic type detection (numbers, booleans)
    pub auto_detect_types: bool,
    /// Treat fields starting with `=` as formulas
    pub detect_formulas: bool,
    /// Name given to the single worksheet
    pub sheet_name: String,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_header: true,
            auto_detect_types: true,
            detect_formulas: true,
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl CsvReadOptions {
    /// Tab-separated defaults
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}
