//! JSON dashboard rendering for scripted callers.

use crate::output::Summary;
use anyhow::Result;
use serde_json::json;

pub fn render(summary: &Summary) -> Result<String> {
    let sides: Vec<serde_json::Value> = summary
        .sides
        .iter()
        .map(|side| {
            let c = &side.counts;
            json!({
                "label": side.label,
                "path": side.path,
                "sheet": side.sheet,
                "rows": c.total,
                "full_match": { "count": c.full, "percent": c.percent(c.full) },
                "partial_match": { "count": c.partial, "percent": c.percent(c.partial) },
                "no_match": { "count": c.no_match, "percent": c.percent(c.no_match) },
            })
        })
        .collect();

    let value = json!({
        "sides": sides,
        "report": summary.report,
        "split_reports": summary.split_reports,
        "filtered_report": summary.filtered_report,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
