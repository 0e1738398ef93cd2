//! Cell value decoding by `t` attribute.

use crate::XlsxFixture;
use cellscope_core::{diff_sheets, inspect, CellError, CellValue, ChangeKind, TypeTag};
use pretty_assertions::assert_eq;

#[test]
fn test_sample_table() {
    let workbook = XlsxFixture::new()
        .shared_strings(&["Name", "Value1", "Value2", "Item1", "Item2", "Item3"])
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c></row>
               <row r="2"><c r="A2" t="s"><v>3</v></c><c r="B2"><v>10</v></c><c r="C2"><v>20</v></c></row>
               <row r="3"><c r="A3" t="s"><v>4</v></c><c r="B3"><v>30</v></c><c r="C3"><v>40</v></c></row>
               <row r="4"><c r="A4" t="s"><v>5</v></c><c r="B4"><v>50</v></c><c r="C4"><v>60</v></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    let lines: Vec<String> = inspect(sheet)
        .unwrap()
        .iter()
        .map(|d| d.to_string())
        .collect();

    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "A1: val=Name, type=text");
    assert_eq!(lines[4], "B2: val=10, type=number");
    assert_eq!(lines[11], "C4: val=60, type=number");
}

#[test]
fn test_scalar_types() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Types",
            r#"<row r="1"><c r="A1" t="b"><v>1</v></c><c r="B1" t="b"><v>0</v></c><c r="C1" t="e"><v>#N/A</v></c><c r="D1"><v>2.5</v></c><c r="E1" t="inlineStr"><is><t>inline</t></is></c></row>"#,
        )
        .read();

    let sheet = workbook.worksheet_by_name("Types").unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::Boolean(true));
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::Boolean(false));
    assert_eq!(sheet.get_value("C1").unwrap(), CellValue::Error(CellError::Na));
    assert_eq!(sheet.get_value("D1").unwrap(), CellValue::Number(2.5));
    assert_eq!(sheet.get_value("E1").unwrap(), CellValue::text("inline"));
    assert_eq!(sheet.cell_at(1, 3).unwrap().type_tag, TypeTag::Error);
}

#[test]
fn test_rich_text_runs_are_joined() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="inlineStr"><is><r><t>Hello</t></r><r><t>World</t></r></is></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("HelloWorld"));
}

#[test]
fn test_escaped_shared_string() {
    let workbook = XlsxFixture::new()
        .shared_strings(&["Line1_x000a_Line2", "Fish &amp; Chips"])
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("Line1\nLine2"));
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::text("Fish & Chips"));
}

#[test]
fn test_surrounding_spaces_are_kept() {
    let workbook = XlsxFixture::new()
        .shared_strings(&["  Senior "])
        .sheet(
            "Sheet1",
            r#"<row r="1">
                 <c r="A1" t="s"><v>0</v></c>
                 <c r="B1" t="inlineStr"><is><r><t>Hello</t></r><r><t xml:space="preserve"> </t></r><r><t>World</t></r></is></c>
                 <c r="C1" t="str"><f>A1</f><v>  Senior </v></c>
               </row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.max_column(), 3);
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("  Senior "));
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::text("Hello World"));
    assert_eq!(
        sheet.cell_at(1, 3).unwrap().value,
        CellValue::text("  Senior ")
    );
}

#[test]
fn test_whitespace_only_change_is_a_difference() {
    let original = XlsxFixture::new()
        .shared_strings(&["Senior"])
        .sheet("Sheet1", r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#)
        .read();
    let modified = XlsxFixture::new()
        .shared_strings(&["Senior "])
        .sheet("Sheet1", r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#)
        .read();

    let diff = diff_sheets(
        original.active_worksheet().unwrap(),
        modified.active_worksheet().unwrap(),
    )
    .unwrap();
    assert_eq!(diff.count(ChangeKind::Modified), 1);
}

#[test]
fn test_non_finite_number_is_text_and_stable() {
    let workbook = XlsxFixture::new()
        .sheet("Sheet1", r#"<row r="1"><c r="A1"><v>NaN</v></c></row>"#)
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("NaN"));
    assert_eq!(inspect(sheet).unwrap(), inspect(sheet).unwrap());
    assert!(diff_sheets(sheet, sheet).unwrap().is_empty());
}
