//! Worksheet part parsing

use std::io::{BufReader, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::strings::decode_excel_escapes;
use crate::error::{XlsxError, XlsxResult};
use cellscope_core::{CellAddress, CellContent, CellError, CellValue, Worksheet, FORMULA_MARKER};

/// What has been collected for the `<c>` element being read
#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    col: u32,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
}

impl PendingCell {
    /// Position from the `r` attribute, or the next column of the current row
    fn start(e: &BytesStart, row: u32, prev_col: u32) -> XlsxResult<Self> {
        let mut cell = PendingCell {
            row,
            col: prev_col + 1,
            ..Default::default()
        };

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    let reference = attr.unescape_value()?;
                    let addr = CellAddress::parse(&reference).map_err(|e| {
                        XlsxError::Parse(format!("Invalid cell reference '{}': {}", reference, e))
                    })?;
                    cell.row = addr.row;
                    cell.col = addr.col;
                }
                b"t" => {
                    cell.cell_type = Some(attr.unescape_value()?.into_owned());
                }
                _ => {}
            }
        }

        if cell.row == 0 {
            return Err(XlsxError::Parse(
                "cell without a reference outside of a row".into(),
            ));
        }
        Ok(cell)
    }

    /// Store the cell; one without value or formula only extends the used range
    fn finish(self, worksheet: &mut Worksheet, shared_strings: &[String]) -> XlsxResult<()> {
        let PendingCell {
            row,
            col,
            cell_type,
            value,
            formula,
        } = self;

        let content = match (formula, value) {
            (Some(f), value) => {
                let cached = match value {
                    Some(v) => Some(decode_value(cell_type.as_deref(), &v, shared_strings)?),
                    None => None,
                };
                // <f> never stores the marker; text that already has one keeps both
                CellContent::Formula {
                    text: format!("{}{}", FORMULA_MARKER, f),
                    cached,
                }
            }
            (None, Some(v)) => {
                CellContent::Literal(decode_value(cell_type.as_deref(), &v, shared_strings)?)
            }
            (None, None) => {
                worksheet.touch(row, col)?;
                return Ok(());
            }
        };

        worksheet.set_content_at(row, col, content)?;
        Ok(())
    }
}

/// Decode a `<v>` (or inline string) according to the cell's `t` attribute
fn decode_value(cell_type: Option<&str>, value: &str, shared_strings: &[String]) -> XlsxResult<CellValue> {
    let decoded = match cell_type {
        // Shared string
        Some("s") => {
            let idx: usize = value.parse().map_err(|_| {
                XlsxError::Parse(format!("Invalid shared string index: {}", value))
            })?;
            let s = shared_strings.get(idx).ok_or_else(|| {
                XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
            })?;
            CellValue::text(s.as_str())
        }

        Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),

        Some("e") => CellError::parse(value)
            .map(CellValue::Error)
            .unwrap_or_else(|| CellValue::text(value)),

        Some("inlineStr") | Some("str") => CellValue::text(decode_excel_escapes(value)),

        // Number (default type or explicit "n"); NaN and infinities stay text
        None | Some("n") => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::text(value),
        },

        // "d" (ISO date) and anything unknown stay as text
        Some(_) => CellValue::text(value),
    };
    Ok(decoded)
}

fn row_number(e: &BytesStart, prev_row: u32) -> XlsxResult<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"r" {
            let value = attr.unescape_value()?;
            return value
                .parse::<u32>()
                .map_err(|_| XlsxError::Parse(format!("Invalid row number: {}", value)));
        }
    }
    Ok(prev_row + 1)
}

/// Read the cells of one worksheet part into `worksheet`
pub(crate) fn read_worksheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
    worksheet: &mut Worksheet,
    shared_strings: &[String],
) -> XlsxResult<()> {
    let file = archive
        .by_name(path)
        .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

    let reader = BufReader::new(file);
    // No trimming: only text inside <v>, <f> or <t> reaches a cell
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();

    let mut current_row = 0u32;
    let mut prev_col = 0u32;
    let mut current: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_formula = false;
    let mut in_inline_str = false;
    let mut in_inline_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"row" => {
                    current_row = row_number(&e, current_row)?;
                    prev_col = 0;
                }
                b"c" => {
                    current = Some(PendingCell::start(&e, current_row, prev_col)?);
                }
                b"v" if current.is_some() => in_value = true,
                b"f" if current.is_some() => in_formula = true,
                b"is" if current.is_some() => in_inline_str = true,
                b"t" if in_inline_str => in_inline_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"c" => {
                    if let Some(cell) = current.take() {
                        prev_col = cell.col;
                        cell.finish(worksheet, shared_strings)?;
                    }
                }
                b"v" => in_value = false,
                b"f" => in_formula = false,
                b"is" => in_inline_str = false,
                b"t" if in_inline_str => in_inline_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Some(cell) = current.as_mut() {
                    if in_value {
                        cell.value = Some(e.unescape()?.into_owned());
                    } else if in_formula {
                        cell.formula = Some(e.unescape()?.into_owned());
                    } else if in_inline_text {
                        // Rich inline strings arrive as several runs
                        cell.value
                            .get_or_insert_with(String::new)
                            .push_str(&e.unescape()?);
                        cell.cell_type = Some("inlineStr".to_string());
                    }
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"row" => {
                    current_row = row_number(&e, current_row)?;
                    prev_col = 0;
                }
                b"c" => {
                    let cell = PendingCell::start(&e, current_row, prev_col)?;
                    prev_col = cell.col;
                    cell.finish(worksheet, shared_strings)?;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    log::debug!(
        "read worksheet '{}' from {}: {} rows x {} columns",
        worksheet.name(),
        path,
        worksheet.max_row(),
        worksheet.max_column()
    );
    Ok(())
}
