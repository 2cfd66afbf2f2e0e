//! XML parsing for worksheet data.
//!
//! Parses the workbook structure, shared strings, relationships, and
//! individual worksheet parts into row-major [`CellValue`] rows. Only cached
//! cell values are read; formula text is skipped because comparison operates
//! on values.

use crate::addressing::parse_cell_ref;
use crate::workbook::CellValue;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetParseError {
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("invalid cell reference: {0}")]
    InvalidCellRef(String),
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),
}

/// A sheet entry from `xl/workbook.xml`.
pub struct SheetEntry {
    pub name: String,
    pub rel_id: Option<String>,
    pub sheet_id: Option<u32>,
}

pub fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                // Rich-text runs flatten into one string.
                let text = reader.read_text(e.name()).map_err(to_xml_err)?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(std::mem::take(&mut current));
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

pub fn parse_workbook_xml(xml: &[u8]) -> Result<Vec<SheetEntry>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rel_id = None;
                let mut sheet_id = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| SheetParseError::Xml(e.to_string()))?;
                    match attr.key.as_ref() {
                        b"name" => {
                            name = Some(unescape_attr(&attr)?);
                        }
                        b"sheetId" => {
                            sheet_id = unescape_attr(&attr)?.parse::<u32>().ok();
                        }
                        b"r:id" => {
                            rel_id = Some(unescape_attr(&attr)?);
                        }
                        _ => {}
                    }
                }
                if let Some(name) = name {
                    sheets.push(SheetEntry {
                        name,
                        rel_id,
                        sheet_id,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parse `xl/_rels/workbook.xml.rels` into rel-id -> worksheet target.
pub fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| SheetParseError::Xml(e.to_string()))?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(unescape_attr(&attr)?),
                        b"Target" => target = Some(unescape_attr(&attr)?),
                        b"Type" => rel_type = Some(unescape_attr(&attr)?),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type.contains("worksheet") {
                        map.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(map)
}

/// Resolve the archive path of a sheet's XML part, falling back to the
/// conventional `xl/worksheets/sheetN.xml` location when relationships are
/// missing.
pub fn resolve_sheet_target(
    sheet: &SheetEntry,
    relationships: &HashMap<String, String>,
    index: usize,
) -> String {
    if let Some(rel_id) = &sheet.rel_id {
        if let Some(target) = relationships.get(rel_id) {
            return normalize_target(target);
        }
    }
    let guessed = match sheet.sheet_id {
        Some(id) => format!("xl/worksheets/sheet{id}.xml"),
        None => format!("xl/worksheets/sheet{}.xml", index + 1),
    };
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") {
        trimmed.to_string()
    } else {
        format!("xl/{trimmed}")
    }
}

/// Parse a worksheet part into dense rows. Gaps between occupied cells in a
/// row are filled with [`CellValue::Blank`]; rows keep their own width so a
/// short row stays short (out-of-range columns are the classifier's concern).
pub fn parse_sheet_rows(
    xml: &[u8],
    shared_strings: &[String],
) -> Result<Vec<Vec<CellValue>>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut cells: Vec<(u32, u32, CellValue)> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let start = e.to_owned();
                if let Some(cell) = parse_cell(&mut reader, &start, shared_strings)? {
                    cells.push(cell);
                }
            }
            // Self-closing cells carry no value.
            Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(assemble_rows(cells))
}

fn assemble_rows(cells: Vec<(u32, u32, CellValue)>) -> Vec<Vec<CellValue>> {
    let nrows = cells
        .iter()
        .map(|(r, _, _)| *r + 1)
        .max()
        .unwrap_or(0) as usize;
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); nrows];

    for (r, c, value) in cells {
        let row = &mut rows[r as usize];
        let col = c as usize;
        if row.len() <= col {
            row.resize(col + 1, CellValue::Blank);
        }
        row[col] = value;
    }

    rows
}

fn cell_position(start: &BytesStart<'_>) -> Result<(u32, u32), SheetParseError> {
    let reference = attr_value(start, b"r")?
        .ok_or_else(|| SheetParseError::Xml("cell missing reference".into()))?;
    parse_cell_ref(&reference).ok_or(SheetParseError::InvalidCellRef(reference))
}

fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    shared_strings: &[String],
) -> Result<Option<(u32, u32, CellValue)>, SheetParseError> {
    let (row, col) = cell_position(start)?;
    let cell_type = attr_value(start, b"t")?;

    let mut value_text: Option<String> = None;
    let mut inline_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                value_text = Some(reader.read_text(e.name()).map_err(to_xml_err)?.into_owned());
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"f" => {
                let _ = reader.read_text(e.name()).map_err(to_xml_err)?;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"is" => {
                inline_text = Some(read_inline_string(reader)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == start.name().as_ref() => break,
            Ok(Event::Eof) => {
                return Err(SheetParseError::Xml("unexpected EOF inside cell".into()));
            }
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }

    let value = match inline_text {
        Some(text) => Some(CellValue::Text(text)),
        None => convert_value(value_text.as_deref(), cell_type.as_deref(), shared_strings)?,
    };

    Ok(value.map(|v| (row, col, v)))
}

fn read_inline_string(reader: &mut Reader<&[u8]>) -> Result<String, SheetParseError> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" => {
                let text = reader.read_text(e.name()).map_err(to_xml_err)?;
                value.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"is" => break,
            Ok(Event::Eof) => {
                return Err(SheetParseError::Xml(
                    "unexpected EOF inside inline string".into(),
                ));
            }
            Err(e) => return Err(to_xml_err(e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn convert_value(
    value_text: Option<&str>,
    cell_type: Option<&str>,
    shared_strings: &[String],
) -> Result<Option<CellValue>, SheetParseError> {
    let raw = match value_text {
        Some(t) => t,
        None => return Ok(None),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Some(CellValue::Text(String::new())));
    }

    match cell_type {
        Some("s") => {
            let idx = trimmed
                .parse::<usize>()
                .map_err(|e| SheetParseError::Xml(e.to_string()))?;
            let text = shared_strings
                .get(idx)
                .ok_or(SheetParseError::SharedStringOutOfBounds(idx))?;
            Ok(Some(CellValue::Text(text.clone())))
        }
        Some("b") => Ok(match trimmed {
            "1" => Some(CellValue::Bool(true)),
            "0" => Some(CellValue::Bool(false)),
            _ => None,
        }),
        Some("str") | Some("inlineStr") => Ok(Some(CellValue::Text(raw.to_string()))),
        Some("e") => Ok(Some(CellValue::Text(trimmed.to_string()))),
        _ => {
            if let Ok(n) = trimmed.parse::<f64>() {
                Ok(Some(CellValue::Number(n)))
            } else {
                Ok(Some(CellValue::Text(trimmed.to_string())))
            }
        }
    }
}

fn attr_value(
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, SheetParseError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| SheetParseError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(unescape_attr(&attr)?));
        }
    }
    Ok(None)
}

fn unescape_attr(attr: &quick_xml::events::attributes::Attribute<'_>) -> Result<String, SheetParseError> {
    Ok(attr
        .unescape_value()
        .map_err(|e| SheetParseError::Xml(e.to_string()))?
        .into_owned())
}

fn to_xml_err(err: quick_xml::Error) -> SheetParseError {
    SheetParseError::Xml(err.to_string())
}
