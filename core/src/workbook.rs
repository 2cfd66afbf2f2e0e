//! Workbook and sheet data structures.
//!
//! This module defines the intermediate representation used for comparison:
//! - [`Workbook`]: a collection of named sheets
//! - [`Sheet`]: an ordered, row-major list of rows; row 0 is the header row
//! - [`CellValue`]: a scalar cell value with a canonical string form
//!
//! All row comparison is performed on the canonical string form produced by
//! [`CellValue::to_display_string`], so a numeric `5` and a textual `"5"`
//! compare equal.

use serde::{Deserialize, Serialize};

/// A scalar cell value as read from a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Blank,
}

impl CellValue {
    /// Canonical string form used for comparison and for rendering into
    /// reports. Integral numbers render without a fractional part so that
    /// `5` and `"5"` coincide regardless of how the source file stored them.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::Blank => String::new(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A single sheet: ordered rows of cell values. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Display name of the sheet (e.g. "Sheet1").
    pub name: String,
    /// Row-major cell data. Rows may be ragged; absent trailing cells
    /// compare and render the same as blanks.
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    /// Header labels rendered from row 0. Empty when the sheet has no rows.
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(CellValue::to_display_string).collect())
            .unwrap_or_default()
    }

    /// Data rows, excluding the header row.
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Width of the widest row.
    pub fn ncols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

/// A workbook: the ordered sheets of one spreadsheet file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a sheet by name, or fall back to the first sheet when no name
    /// is given.
    pub fn sheet(&self, name: Option<&str>) -> Option<&Sheet> {
        match name {
            Some(name) => self.sheets.iter().find(|s| s.name == name),
            None => self.sheets.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn display_string_integral_number_has_no_fraction() {
        assert_eq!(CellValue::Number(5.0).to_display_string(), "5");
        assert_eq!(CellValue::Number(-3.0).to_display_string(), "-3");
        assert_eq!(CellValue::Number(0.0).to_display_string(), "0");
    }

    #[test]
    fn display_string_fractional_number() {
        assert_eq!(CellValue::Number(5.5).to_display_string(), "5.5");
        assert_eq!(CellValue::Number(-0.25).to_display_string(), "-0.25");
    }

    #[test]
    fn display_string_text_bool_blank() {
        assert_eq!(text("Alice").to_display_string(), "Alice");
        assert_eq!(CellValue::Bool(true).to_display_string(), "TRUE");
        assert_eq!(CellValue::Bool(false).to_display_string(), "FALSE");
        assert_eq!(CellValue::Blank.to_display_string(), "");
    }

    #[test]
    fn number_and_text_forms_coincide() {
        assert_eq!(
            CellValue::Number(5.0).to_display_string(),
            text("5").to_display_string()
        );
    }

    #[test]
    fn headers_come_from_row_zero() {
        let sheet = Sheet::new(
            "Data",
            vec![
                vec![text("ID"), CellValue::Number(2.0)],
                vec![CellValue::Number(1.0), text("Alice")],
            ],
        );
        assert_eq!(sheet.headers(), vec!["ID".to_string(), "2".to_string()]);
        assert_eq!(sheet.data_rows().len(), 1);
    }

    #[test]
    fn empty_sheet_has_no_headers_or_data() {
        let sheet = Sheet::new("Empty", Vec::new());
        assert!(sheet.headers().is_empty());
        assert!(sheet.data_rows().is_empty());
        assert_eq!(sheet.ncols(), 0);
    }

    #[test]
    fn sheet_lookup_by_name_and_default() {
        let wb = Workbook {
            sheets: vec![Sheet::new("First", Vec::new()), Sheet::new("Second", Vec::new())],
        };
        assert_eq!(wb.sheet(Some("Second")).map(|s| s.name.as_str()), Some("Second"));
        assert_eq!(wb.sheet(None).map(|s| s.name.as_str()), Some("First"));
        assert!(wb.sheet(Some("Missing")).is_none());
    }
}
