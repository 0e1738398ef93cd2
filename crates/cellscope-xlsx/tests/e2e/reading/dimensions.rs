//! Used range (extent) of loaded sheets.

use crate::XlsxFixture;
use cellscope_core::{inspect, preview_rows, CellValue, TypeTag};
use pretty_assertions::assert_eq;

#[test]
fn test_styled_empty_cell_extends_range() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1"><v>1</v></c></row><row r="3"><c r="D3" s="1"/></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!((sheet.max_row(), sheet.max_column()), (3, 4));

    let descriptors = inspect(sheet).unwrap();
    assert_eq!(descriptors.len(), 12);
    assert_eq!(descriptors[11].reference, "D3");
    assert_eq!(descriptors[11].type_tag, TypeTag::Null);
}

#[test]
fn test_cells_without_reference() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row><c><v>1</v></c><c><v>2</v></c></row><row><c><v>3</v></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::Number(2.0));
    assert_eq!(sheet.get_value("A2").unwrap(), CellValue::Number(3.0));
}

#[test]
fn test_empty_sheet_inspects_to_nothing() {
    let workbook = XlsxFixture::new().sheet("Empty", "").read();
    let sheet = workbook.active_worksheet().unwrap();

    assert!(inspect(sheet).unwrap().is_empty());
    assert!(preview_rows(sheet, 6).unwrap().is_empty());
}

#[test]
fn test_active_tab() {
    let workbook = XlsxFixture::new()
        .sheet("First", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#)
        .sheet("Second", r#"<row r="1"><c r="A1"><v>2</v></c></row>"#)
        .active_tab(1)
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.name(), "Second");
}
