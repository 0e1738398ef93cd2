//! Shared string table and Excel string escapes

use std::io::{BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters XML cannot carry:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut consumed_x = false;

        if chars.peek() == Some(&'x') {
            chars.next();
            consumed_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                let decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
                if let Some(decoded) = decoded {
                    chars.next();
                    result.push(decoded);
                    continue;
                }
            }
        }

        // Not an escape: emit what was consumed
        result.push('_');
        if consumed_x {
            result.push('x');
            result.push_str(&hex_chars);
        }
    }

    result
}

/// Read `xl/sharedStrings.xml`; a package without one has no shared strings
pub(crate) fn read_shared_strings<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> XlsxResult<Vec<String>> {
    let mut strings = Vec::new();

    let file = match archive.by_name("xl/sharedStrings.xml") {
        Ok(f) => f,
        Err(_) => return Ok(strings),
    };

    let reader = BufReader::new(file);
    // No trimming: `<t xml:space="preserve">` runs keep their spaces
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut current_string = String::new();
    let mut in_si = false;
    let mut in_t = false;
    // Phonetic runs are annotations, not part of the string
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current_string.clear();
                }
                b"rPh" if in_si => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current_string));
                    current_string.clear();
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                let text = e.unescape()?;
                current_string.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    log::debug!("read {} shared strings", strings.len());
    Ok(strings)
}
