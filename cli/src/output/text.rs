//! Plain-text dashboard rendering.

use crate::output::Summary;
use std::fmt::Write;

pub fn render(summary: &Summary) -> String {
    let mut out = String::new();
    for side in &summary.sides {
        let c = &side.counts;
        let _ = writeln!(
            out,
            "{} [{} / {}] (Rows: {})",
            side.label, side.path, side.sheet, c.total
        );
        let _ = writeln!(
            out,
            "  Full Match: {} ({:.1}%)  Partial Match: {} ({:.1}%)  No Match: {} ({:.1}%)",
            c.full,
            c.percent(c.full),
            c.partial,
            c.percent(c.partial),
            c.no_match,
            c.percent(c.no_match),
        );
    }

    let _ = writeln!(out, "Report written to {}", summary.report.display());
    for path in &summary.split_reports {
        let _ = writeln!(out, "Split report written to {}", path.display());
    }
    if let Some(path) = &summary.filtered_report {
        let _ = writeln!(out, "Filtered report written to {}", path.display());
    }
    out
}
