//! Loading `.xlsx` files into the in-memory [`Workbook`] representation.
//!
//! Orchestrates the container and parser layers: open the ZIP, read
//! `xl/workbook.xml` for the sheet list, resolve each sheet's part through
//! the workbook relationships, and parse every part into dense rows.

use crate::container::{ContainerError, XlsxContainer};
use crate::sheet_parser::{
    self, SheetParseError, parse_relationships, parse_shared_strings, parse_workbook_xml,
    resolve_sheet_target,
};
use crate::workbook::{Sheet, Workbook};
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkbookError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("failed to parse {part}: {source}")]
    Parse {
        part: String,
        source: SheetParseError,
    },
    #[error("package has no xl/workbook.xml part")]
    WorkbookXmlMissing,
    #[error("worksheet part missing for sheet {name:?}: {path}")]
    WorksheetMissing { name: String, path: String },
}

/// Open an `.xlsx` file from disk and parse all of its sheets.
pub fn open_workbook(path: impl AsRef<Path>) -> Result<Workbook, WorkbookError> {
    let container = XlsxContainer::open_from_path(path)?;
    read_workbook(container)
}

/// Parse a workbook from any seekable reader (e.g. an in-memory buffer).
pub fn open_workbook_from_reader<R: Read + Seek + 'static>(
    reader: R,
) -> Result<Workbook, WorkbookError> {
    let container = XlsxContainer::open_from_reader(reader)?;
    read_workbook(container)
}

fn read_workbook(mut container: XlsxContainer) -> Result<Workbook, WorkbookError> {
    let workbook_xml = container
        .read_file_optional("xl/workbook.xml")?
        .ok_or(WorkbookError::WorkbookXmlMissing)?;
    let entries = parse_workbook_xml(&workbook_xml).map_err(|e| parse_err("xl/workbook.xml", e))?;

    let relationships = match container.read_file_optional("xl/_rels/workbook.xml.rels")? {
        Some(bytes) => parse_relationships(&bytes)
            .map_err(|e| parse_err("xl/_rels/workbook.xml.rels", e))?,
        None => HashMap::new(),
    };

    let shared_strings = match container.read_file_optional("xl/sharedStrings.xml")? {
        Some(bytes) => {
            parse_shared_strings(&bytes).map_err(|e| parse_err("xl/sharedStrings.xml", e))?
        }
        None => Vec::new(),
    };

    let mut sheets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let target = resolve_sheet_target(entry, &relationships, index);
        let bytes =
            container
                .read_file_optional(&target)?
                .ok_or_else(|| WorkbookError::WorksheetMissing {
                    name: entry.name.clone(),
                    path: target.clone(),
                })?;
        let rows = sheet_parser::parse_sheet_rows(&bytes, &shared_strings)
            .map_err(|e| parse_err(&target, e))?;
        sheets.push(Sheet::new(entry.name.clone(), rows));
    }

    Ok(Workbook { sheets })
}

fn parse_err(part: &str, source: SheetParseError) -> WorkbookError {
    WorkbookError::Parse {
        part: part.to_string(),
        source,
    }
}
