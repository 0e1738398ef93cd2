//! End-to-end loading: file on disk -> workbook -> inspection.

use std::io::Write;
use std::path::Path;

use cellscope::prelude::*;
use cellscope::{ChangeKind, CsvReadOptions};
use pretty_assertions::assert_eq;

const SAMPLE_CSV: &str = "Name,Value1,Value2\nItem1,10,20\nItem2,30,40\nItem3,50,60\n";

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Two-sheet package; the second sheet has a formula stored with its marker
fn write_xlsx(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    let parts: [(&str, &str); 5] = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#,
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0"?><workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Totals" sheetId="2" r:id="rId2"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0"?><Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#,
        ),
        (
            "xl/worksheets/sheet1.xml",
            r#"<?xml version="1.0"?><worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Value</t></is></c></row><row r="2"><c r="A2"><v>10</v></c></row><row r="3"><c r="A3"><v>20</v></c></row></sheetData></worksheet>"#,
        ),
        (
            "xl/worksheets/sheet2.xml",
            r#"<?xml version="1.0"?><worksheet><sheetData><row r="1"><c r="A1"><f>=SUM(Data!A2:A3)</f><v>30</v></c></row></sheetData></worksheet>"#,
        ),
    ];
    for (name, xml) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

#[test]
fn test_load_csv_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "test_data.csv", SAMPLE_CSV.as_bytes());

    let workbook = cellscope::load(&path).unwrap();
    let sheet = workbook.active_worksheet().unwrap();
    let descriptors = inspect(sheet).unwrap();

    assert_eq!(descriptors.len(), 12);
    assert_eq!(descriptors[0].to_string(), "A1: val=Name, type=text");
    assert_eq!(descriptors[11].to_string(), "C4: val=60, type=number");
    assert_eq!(preview_rows(sheet, 6).unwrap().len(), 4);
}

#[test]
fn test_load_tsv_uses_tab_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.TSV", b"a\tb\n1\t2\n");

    let workbook = Workbook::open(&path).unwrap();
    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.max_column(), 2);
    assert_eq!(sheet.get_value("B2").unwrap(), CellValue::Number(2.0));
}

#[test]
fn test_explicit_delimiter_wins_over_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.tsv", b"a,b\n1,2\n");

    let options = LoadOptions::default().with_delimiter(b',');
    let workbook = cellscope::load_with_options(&path, &options).unwrap();
    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.max_column(), 2);
    assert_eq!(sheet.get_value("B2").unwrap(), CellValue::Number(2.0));

    let path = write_file(dir.path(), "data.csv", b"a;b\n1;2\n");
    let options = LoadOptions::default().with_delimiter(b';');
    let workbook = cellscope::load_with_options(&path, &options).unwrap();
    assert_eq!(workbook.active_worksheet().unwrap().max_column(), 2);
}

#[test]
fn test_csv_options_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.csv", b"a;b\n1;2\n");

    let options = LoadOptions {
        csv: CsvReadOptions {
            delimiter: b';',
            auto_detect_types: false,
            ..Default::default()
        },
        sheet: None,
        delimiter: None,
    };
    let workbook = cellscope::load_with_options(&path, &options).unwrap();
    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.get_value("A2").unwrap(), CellValue::text("1"));
}

#[test]
fn test_load_xlsx_with_sheet_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "book.xlsx");

    let workbook = cellscope::load(&path).unwrap();
    assert_eq!(workbook.active_worksheet().unwrap().name(), "Data");

    let options = LoadOptions::default().with_sheet("Totals");
    let workbook = cellscope::load_with_options(&path, &options).unwrap();
    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.name(), "Totals");

    let findings = check_formulas(&inspect(sheet).unwrap());
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].to_string(),
        "A1: duplicate formula marker (2x '=') in ==SUM(Data!A2:A3)"
    );
}

#[test]
fn test_unknown_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "book.xlsx");

    let options = LoadOptions::default().with_sheet("Missing");
    let err = cellscope::load_with_options(&path, &options).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Core(Error::SheetNotFound(ref name)) if name == "Missing"
    ));
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.xlsx");
    assert!(matches!(
        cellscope::load(&missing),
        Err(LoadError::NotFound(_))
    ));

    let text = write_file(dir.path(), "notes.txt", b"hello");
    assert!(matches!(
        cellscope::load(&text),
        Err(LoadError::UnsupportedFormat(_))
    ));

    let fake = write_file(dir.path(), "fake.xlsx", SAMPLE_CSV.as_bytes());
    assert!(matches!(cellscope::load(&fake), Err(LoadError::Xlsx(_))));

    // A directory is not a file
    let folder = dir.path().join("folder.csv");
    std::fs::create_dir(&folder).unwrap();
    assert!(matches!(
        cellscope::load(&folder),
        Err(LoadError::NotFound(_))
    ));
}

#[test]
fn test_original_and_modified() {
    let dir = tempfile::tempdir().unwrap();
    let original = write_file(dir.path(), "test_data.csv", SAMPLE_CSV.as_bytes());
    let modified = write_file(
        dir.path(),
        "modified.csv",
        b"Name,Value1,Value2,Total\nItem1,10,20,=B2+C2\nItem2,30,40,==B3+C3\nItem3,50,60,=B4+C4\n",
    );

    let before = cellscope::load(&original).unwrap();
    let after = cellscope::load(&modified).unwrap();
    let diff = diff_sheets(
        before.active_worksheet().unwrap(),
        after.active_worksheet().unwrap(),
    )
    .unwrap();

    assert_eq!(diff.count(ChangeKind::Added), 4);
    assert_eq!(diff.count(ChangeKind::Modified), 0);
    assert_eq!(diff.modified_extent, (4, 4));

    let modified_sheet = after.active_worksheet().unwrap();
    let findings = check_formulas(&inspect(modified_sheet).unwrap());
    let refs: Vec<&str> = findings.iter().map(|f| f.reference.as_str()).collect();
    assert_eq!(refs, vec!["D3"]);
}
