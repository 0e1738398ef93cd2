//! Formula cells keep their text and cached result.

use crate::XlsxFixture;
use cellscope_core::{check_formulas, inspect, CellContent, CellValue, FormulaMarkerAnomaly};
use pretty_assertions::assert_eq;

#[test]
fn test_formula_with_cached_value() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1"><v>10</v></c><c r="B1"><v>20</v></c><c r="C1"><f>SUM(A1:B1)</f><v>30</v></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    assert_eq!(
        sheet.content("C1").unwrap(),
        Some(&CellContent::Formula {
            text: "=SUM(A1:B1)".into(),
            cached: Some(CellValue::Number(30.0)),
        })
    );

    let descriptors = inspect(sheet).unwrap();
    assert_eq!(
        descriptors[2].to_string(),
        "C1: val=30, type=formula, formula==SUM(A1:B1)"
    );
    assert!(check_formulas(&descriptors).is_empty());
}

#[test]
fn test_string_formula_without_cache() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="str"><f>IF(B1&lt;30,"Young","Senior")</f></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    let cell = sheet.cell_at(1, 1).unwrap();
    assert_eq!(cell.value, CellValue::Null);
    assert_eq!(cell.formula.as_deref(), Some("=IF(B1<30,\"Young\",\"Senior\")"));
}

#[test]
fn test_stored_marker_is_reported_not_stripped() {
    let workbook = XlsxFixture::new()
        .sheet(
            "Sheet1",
            r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1"><f>=SUM(A1:A3)</f></c></row>"#,
        )
        .read();

    let sheet = workbook.active_worksheet().unwrap();
    let descriptors = inspect(sheet).unwrap();
    assert_eq!(descriptors[1].formula.as_deref(), Some("==SUM(A1:A3)"));

    let findings = check_formulas(&descriptors);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].reference, "B1");
    assert_eq!(
        findings[0].anomaly,
        FormulaMarkerAnomaly::DuplicateMarker { markers: 2 }
    );
}
