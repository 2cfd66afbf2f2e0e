//! Styled report workbooks.
//!
//! Writes classified rows back out as `.xlsx`: one sheet per input file,
//! header row styled from [`StyleOptions`], each data row filled by its
//! match status, a MatchType column appended, frozen header pane, autofilter
//! and width autofit. Split and filtered variants reuse the same sheet
//! writer.

use crate::classify::{AnnotatedRow, MatchStatus};
use crate::style::{StyleOptions, safe_color};
use crate::workbook::CellValue;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One report sheet: projected headers (MatchType last), the projected
/// column indices, and the classified rows to write.
pub struct ReportSheet<'a> {
    /// Worksheet tab name ("File1" or "File2").
    pub name: String,
    pub headers: Vec<String>,
    pub columns: Vec<usize>,
    pub rows: Vec<AnnotatedRow<'a>>,
}

/// Write one workbook containing every given sheet.
pub fn write_report(
    path: impl AsRef<Path>,
    sheets: &[ReportSheet<'_>],
    style: &StyleOptions,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, style, None)?;
    }
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Write one workbook per (sheet, status) pair, named
/// `<stem>_<file1|file2>_<fullmatch|partialmatch|nomatch>.xlsx` next to
/// `base`. Empty selections are skipped. Returns the paths written.
pub fn write_split_reports(
    base: impl AsRef<Path>,
    sheets: &[ReportSheet<'_>],
    style: &StyleOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for sheet in sheets {
        for status in [MatchStatus::Full, MatchStatus::Partial, MatchStatus::None] {
            if !sheet.rows.iter().any(|r| r.status == status) {
                continue;
            }
            let path = split_report_path(base.as_ref(), &sheet.name, status);
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, sheet, style, Some(status))?;
            workbook.save(&path)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Write one workbook holding only rows of `status`, all sheets included.
pub fn write_filtered_report(
    path: impl AsRef<Path>,
    sheets: &[ReportSheet<'_>],
    style: &StyleOptions,
    status: MatchStatus,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, style, Some(status))?;
    }
    workbook.save(path.as_ref())?;
    Ok(())
}

fn split_report_path(base: &Path, sheet_name: &str, status: MatchStatus) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let ext = base
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xlsx".to_string());
    let status_tag = match status {
        MatchStatus::Full => "fullmatch",
        MatchStatus::Partial => "partialmatch",
        MatchStatus::None => "nomatch",
    };
    let file = format!(
        "{stem}_{side}_{status_tag}.{ext}",
        side = sheet_name.to_lowercase()
    );
    base.with_file_name(file)
}

struct SheetFormats {
    header: Format,
    body: [Format; 3],
}

fn build_formats(style: &StyleOptions) -> SheetFormats {
    let header = Format::new()
        .set_bold()
        .set_font_name(&style.header_font)
        .set_font_size(style.header_font_size)
        .set_font_color(Color::RGB(safe_color(&style.header_font_color)))
        .set_background_color(Color::RGB(safe_color(&style.header_fill)))
        .set_border(border_style(style.header_border))
        .set_border_color(Color::RGB(safe_color(&style.header_border_color)))
        .set_align(FormatAlign::Center);

    let body_base = |fill: &str| {
        Format::new()
            .set_font_name(&style.body_font)
            .set_font_size(style.body_font_size)
            .set_font_color(Color::RGB(safe_color(&style.body_font_color)))
            .set_background_color(Color::RGB(safe_color(fill)))
            .set_border(border_style(style.body_border))
            .set_border_color(Color::RGB(safe_color(&style.body_border_color)))
            .set_align(FormatAlign::Center)
    };

    // Partial and No Match rows get a bold body font so they stand out when
    // scanning a sorted report.
    let body = [
        body_base(&style.full_match_fill),
        body_base(&style.partial_match_fill).set_bold(),
        body_base(&style.no_match_fill).set_bold(),
    ];

    SheetFormats { header, body }
}

fn border_style(thickness: u8) -> FormatBorder {
    match thickness {
        0 => FormatBorder::None,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Thick,
        _ => FormatBorder::Thin,
    }
}

/// Autofitted column width: content width plus padding, kept within 8..=50.
fn fitted_width(content_width: usize, padding: f64) -> f64 {
    (content_width as f64 + padding).clamp(8.0, 50.0)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &ReportSheet<'_>,
    style: &StyleOptions,
    only: Option<MatchStatus>,
) -> Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;
    let formats = build_formats(style);

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &formats.header)?;
    }
    worksheet.set_row_height(0, style.header_row_height)?;

    let mut widths: Vec<usize> = sheet.headers.iter().map(|h| h.chars().count()).collect();

    let mut out_row: u32 = 1;
    for annotated in &sheet.rows {
        if let Some(status) = only {
            if annotated.status != status {
                continue;
            }
        }
        let format = &formats.body[annotated.status.bucket() as usize];

        for (out_col, &src_col) in sheet.columns.iter().enumerate() {
            let cell = annotated
                .row
                .get(src_col)
                .cloned()
                .unwrap_or(CellValue::Blank);
            write_cell(worksheet, out_row, out_col as u16, &cell, format)?;
            track_width(&mut widths, out_col, &cell.to_display_string());
        }
        let status_col = sheet.columns.len();
        let label = annotated.status.label();
        worksheet.write_string_with_format(out_row, status_col as u16, label, format)?;
        track_width(&mut widths, status_col, label);

        worksheet.set_row_height(out_row, style.body_row_height)?;
        out_row += 1;
    }

    worksheet.set_freeze_panes(1, 0)?;
    if !sheet.headers.is_empty() {
        let last_row = out_row.saturating_sub(1);
        let last_col = (sheet.headers.len() - 1) as u16;
        worksheet.autofilter(0, 0, last_row, last_col)?;
    }

    for (col, &width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, fitted_width(width, style.autofit_padding))?;
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        other => {
            worksheet.write_string_with_format(row, col, other.to_display_string(), format)?;
        }
    }
    Ok(())
}

fn track_width(widths: &mut Vec<usize>, col: usize, text: &str) {
    if widths.len() <= col {
        widths.resize(col + 1, 0);
    }
    widths[col] = widths[col].max(text.chars().count());
}
