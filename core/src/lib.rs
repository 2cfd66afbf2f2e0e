//! Row-level spreadsheet comparison.
//!
//! This crate loads two `.xlsx` workbooks, relates their columns through a
//! [`ColumnMapping`] (configured by hand or suggested from header labels),
//! classifies every data row of each sheet as a Full, Partial, or No Match
//! against the other sheet, and writes the classified rows back out as
//! styled `.xlsx` reports.
//!
//! The pipeline is pure: workbooks, mappings, and settings are explicit
//! values passed between stages, and persistence happens only at the
//! [`settings`] and [`profile`] boundaries.

pub mod addressing;
pub mod classify;
pub mod container;
pub mod export;
pub mod mapping;
pub mod open_xlsx;
pub mod profile;
pub mod project;
pub mod settings;
pub mod sheet_parser;
pub mod style;
pub mod workbook;

pub use classify::{AnnotatedRow, MatchCounts, MatchStatus, classify_rows, sort_by_status};
pub use container::ContainerError;
pub use export::{ExportError, ReportSheet, write_filtered_report, write_report, write_split_reports};
pub use mapping::{ColumnMapping, suggest_mapping, suggest_mapping_masked};
pub use open_xlsx::{WorkbookError, open_workbook, open_workbook_from_reader};
pub use profile::MappingProfile;
pub use project::{Side, project_row, projected_columns, projected_headers};
pub use settings::{RECENT_LIMIT, Settings, SettingsError, push_recent};
pub use style::{StyleOptions, safe_color};
pub use workbook::{CellValue, Sheet, Workbook};
