pub mod json;
pub mod text;

use excel_match::MatchCounts;
use std::path::PathBuf;

/// Per-file result block for the dashboard.
pub struct SideSummary {
    pub label: String,
    pub path: String,
    pub sheet: String,
    pub counts: MatchCounts,
}

/// Everything a compare run reports back to the user.
pub struct Summary {
    pub sides: Vec<SideSummary>,
    pub report: PathBuf,
    pub split_reports: Vec<PathBuf>,
    pub filtered_report: Option<PathBuf>,
}
