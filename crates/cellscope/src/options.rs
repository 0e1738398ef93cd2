//! Load options

use cellscope_csv::CsvReadOptions;

/// Options for [`load_with_options`](crate::load_with_options)
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// How CSV and TSV files are parsed
    pub csv: CsvReadOptions,
    /// Sheet to make active instead of the one the file selects
    pub sheet: Option<String>,
    /// Field delimiter forced for both CSV and TSV, over the extension's own
    pub delimiter: Option<u8>,
}

impl LoadOptions {
    pub fn with_sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet = Some(name.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}
