//! XLSX reader

mod sheet;
mod strings;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use cellscope_core::{Workbook, Worksheet};

/// A `<sheet>` entry of `xl/workbook.xml`
#[derive(Debug)]
struct SheetEntry {
    name: String,
    r_id: String,
}

/// What `xl/workbook.xml` says about the sheets
#[derive(Debug, Default)]
struct WorkbookPart {
    sheets: Vec<SheetEntry>,
    active_tab: usize,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        log::debug!("reading XLSX {}", path.display());
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = strings::read_shared_strings(&mut archive)?;
        let workbook_part = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        // `activeTab` counts <sheet> entries, skipped ones included
        let mut active = None;

        for (tab, entry) in workbook_part.sheets.iter().enumerate() {
            let Some(path) = sheet_paths.get(&entry.r_id) else {
                log::warn!(
                    "sheet '{}' has no worksheet relationship ({}), skipping",
                    entry.name,
                    entry.r_id
                );
                continue;
            };

            let mut worksheet = Worksheet::new(entry.name.as_str());
            sheet::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings)?;
            if tab == workbook_part.active_tab {
                active = Some(workbook.sheet_count());
            }
            workbook.add_worksheet(worksheet)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet(Worksheet::new("Sheet1"))?;
        }

        if let Some(index) = active {
            workbook.set_active_sheet(index)?;
        }

        Ok(workbook)
    }

    /// Read workbook.xml to get sheet names, rIds and the active tab
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookPart> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut part = WorkbookPart::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"sheet" => {
                        let mut name = None;
                        let mut r_id = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"r:id" => {
                                    r_id = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }

                        if let (Some(name), Some(r_id)) = (name, r_id) {
                            part.sheets.push(SheetEntry { name, r_id });
                        }
                    }
                    b"workbookView" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"activeTab" {
                                part.active_tab = attr
                                    .unescape_value()
                                    .ok()
                                    .and_then(|s| s.parse().ok())
                                    .unwrap_or(0);
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(part)
    }

    /// Read workbook.xml.rels to get worksheet part paths by rId
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only worksheet relationships matter here
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            rels.insert(id, Self::resolve_target(&target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Targets are relative to `xl/` unless absolute within the package
    fn resolve_target(target: &str) -> String {
        match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{}", target.trim_start_matches("./")),
        }
    }
}
