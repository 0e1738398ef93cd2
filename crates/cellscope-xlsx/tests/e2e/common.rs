//! Common utilities for E2E tests.

use std::io::Write;

use cellscope_core::Workbook;
use cellscope_xlsx::XlsxReader;
use tempfile::NamedTempFile;

/// Builder for minimal XLSX packages.
///
/// Sheet bodies are the raw contents of `<sheetData>`.
///
/// # Example
///
/// ```rust,ignore
/// let workbook = XlsxFixture::new()
///     .shared_strings(&["Name"])
///     .sheet("Sheet1", r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#)
///     .read();
/// ```
#[derive(Default)]
pub struct XlsxFixture {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    active_tab: Option<usize>,
}

impl XlsxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    #[allow(dead_code)]
    pub fn active_tab(mut self, index: usize) -> Self {
        self.active_tab = Some(index);
        self
    }

    /// Write the package to a temp file with an `.xlsx` suffix
    pub fn write(&self) -> NamedTempFile {
        let file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("create temp file");

        let mut zip = zip::ZipWriter::new(file.reopen().expect("reopen temp file"));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/></Types>"#).unwrap();

        let view = self
            .active_tab
            .map(|tab| format!(r#"<bookViews><workbookView activeTab="{}"/></bookViews>"#, tab))
            .unwrap_or_default();
        let mut sheets = String::new();
        let mut rels = String::new();
        for (idx, (name, _)) in self.sheets.iter().enumerate() {
            let n = idx + 1;
            sheets.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                name, n, n
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                n, n
            ));
        }

        zip.start_file("xl/workbook.xml", options).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{}<sheets>{}</sheets></workbook>"#,
            view, sheets
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options)
            .unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
        .unwrap();

        if !self.shared_strings.is_empty() {
            let items: String = self
                .shared_strings
                .iter()
                .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, s))
                .collect();
            zip.start_file("xl/sharedStrings.xml", options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
                self.shared_strings.len(),
                items
            )
            .unwrap();
        }

        for (idx, (_, data)) in self.sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", idx + 1), options)
                .unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                data
            )
            .unwrap();
        }

        zip.finish().unwrap();
        file
    }

    /// Write the package and read it back
    pub fn read(&self) -> Workbook {
        let file = self.write();
        XlsxReader::read_file(file.path()).expect("read fixture")
    }
}
