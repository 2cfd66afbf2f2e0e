//! Row classification.
//!
//! Every data row of one sheet is compared against every data row of the
//! other over the mapped column pairs:
//!
//! - all mapped cells equal in some row of the other sheet: **Full Match**
//!   (scanning stops at the first such row)
//! - at least one mapped cell equal in some row, but never all: **Partial
//!   Match**
//! - otherwise: **No Match**
//!
//! An empty mapping produces no comparisons, so every row stays No Match.
//! Cell equality is over the canonical display string; an index past the end
//! of a row reads as the empty string, the same as a blank cell.

use crate::mapping::ColumnMapping;
use crate::workbook::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Full Match")]
    Full,
    #[serde(rename = "Partial Match")]
    Partial,
    #[serde(rename = "No Match")]
    None,
}

impl MatchStatus {
    /// Human-readable label, used in report cells and dashboards.
    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Full => "Full Match",
            MatchStatus::Partial => "Partial Match",
            MatchStatus::None => "No Match",
        }
    }

    /// Sort bucket: Full rows first, then Partial, then No Match.
    pub fn bucket(self) -> u8 {
        match self {
            MatchStatus::Full => 0,
            MatchStatus::Partial => 1,
            MatchStatus::None => 2,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A data row paired with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow<'a> {
    pub row: &'a [CellValue],
    pub status: MatchStatus,
}

fn cell_text(row: &[CellValue], idx: usize) -> String {
    row.get(idx)
        .map(CellValue::to_display_string)
        .unwrap_or_default()
}

/// Classify each row of `main` against all rows of `other` using `mapping`
/// as source-index to target-index pairs. To classify the second sheet, pass
/// it as `main` with the reversed mapping.
pub fn classify_rows<'a>(
    main: &'a [Vec<CellValue>],
    other: &[Vec<CellValue>],
    mapping: &ColumnMapping,
) -> Vec<AnnotatedRow<'a>> {
    main.iter()
        .map(|row| AnnotatedRow {
            row: row.as_slice(),
            status: classify_row(row, other, mapping),
        })
        .collect()
}

fn classify_row(
    row: &[CellValue],
    other: &[Vec<CellValue>],
    mapping: &ColumnMapping,
) -> MatchStatus {
    let mut status = MatchStatus::None;
    if mapping.is_empty() {
        return status;
    }

    for candidate in other {
        let mut all = true;
        let mut any = false;
        for (a, b) in mapping.iter() {
            if cell_text(row, a) == cell_text(candidate, b) {
                any = true;
            } else {
                all = false;
            }
        }
        if all {
            return MatchStatus::Full;
        }
        if any {
            status = MatchStatus::Partial;
        }
    }

    status
}

/// Stable sort: Full rows first, then Partial, then No Match, each bucket in
/// original row order.
pub fn sort_by_status(rows: &mut [AnnotatedRow<'_>]) {
    rows.sort_by_key(|r| r.status.bucket());
}

/// Per-status totals for one classified sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MatchCounts {
    pub full: usize,
    pub partial: usize,
    pub no_match: usize,
    pub total: usize,
}

impl MatchCounts {
    pub fn tally(rows: &[AnnotatedRow<'_>]) -> MatchCounts {
        let mut counts = MatchCounts::default();
        for r in rows {
            match r.status {
                MatchStatus::Full => counts.full += 1,
                MatchStatus::Partial => counts.partial += 1,
                MatchStatus::None => counts.no_match += 1,
            }
            counts.total += 1;
        }
        counts
    }

    /// Percentage of `total` for one status count; 0.0 when the sheet has no
    /// data rows.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}
