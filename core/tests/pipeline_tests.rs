//! Full pipeline tests: classify two sheets, export a styled report, and
//! read the report back with the same loader the inputs use.

use excel_match::{
    CellValue, ColumnMapping, MatchCounts, MatchStatus, ReportSheet, Side, StyleOptions,
    classify_rows, open_workbook, project_row, projected_columns, projected_headers,
    sort_by_status, suggest_mapping, write_filtered_report, write_report, write_split_reports,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn row(id: f64, name: &str) -> Vec<CellValue> {
    vec![CellValue::Number(id), CellValue::Text(name.to_string())]
}

fn sample_sides() -> (Vec<Vec<CellValue>>, Vec<Vec<CellValue>>) {
    let side1 = vec![row(1.0, "Alice"), row(2.0, "Bob"), row(3.0, "Carol")];
    let side2 = vec![row(1.0, "Alice"), row(2.0, "Bruce"), row(4.0, "Dave")];
    (side1, side2)
}

fn identity_mapping() -> ColumnMapping {
    [(0, 0), (1, 1)].into_iter().collect()
}

#[test]
fn worked_example_classifies_both_directions() {
    let (side1, side2) = sample_sides();
    let mapping = identity_mapping();

    let annotated1 = classify_rows(&side1, &side2, &mapping);
    let statuses1: Vec<MatchStatus> = annotated1.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses1,
        vec![MatchStatus::Full, MatchStatus::Partial, MatchStatus::None]
    );

    let annotated2 = classify_rows(&side2, &side1, &mapping.reversed());
    let statuses2: Vec<MatchStatus> = annotated2.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses2,
        vec![MatchStatus::Full, MatchStatus::Partial, MatchStatus::None]
    );

    let counts = MatchCounts::tally(&annotated1);
    assert_eq!((counts.full, counts.partial, counts.no_match), (1, 1, 1));
    assert_eq!(counts.percent(counts.full), 100.0 / 3.0);
}

#[test]
fn identity_comparison_is_all_full() {
    let (side1, _) = sample_sides();
    let annotated = classify_rows(&side1, &side1, &identity_mapping());
    assert!(annotated.iter().all(|r| r.status == MatchStatus::Full));
}

#[test]
fn suggested_mapping_feeds_classification() {
    let headers1 = vec!["ID".to_string(), "Name".to_string()];
    let headers2 = vec!["name".to_string(), "id".to_string()];
    let mapping = suggest_mapping(&headers1, &headers2);
    assert_eq!(mapping.get(0), Some(1));
    assert_eq!(mapping.get(1), Some(0));

    let side1 = vec![row(1.0, "Alice")];
    let side2 = vec![vec![CellValue::Text("Alice".into()), CellValue::Number(1.0)]];
    let annotated = classify_rows(&side1, &side2, &mapping);
    assert_eq!(annotated[0].status, MatchStatus::Full);
}

#[test]
fn exported_report_round_trips_through_the_loader() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.xlsx");

    let (side1, side2) = sample_sides();
    let mapping = identity_mapping();
    let headers = vec!["ID".to_string(), "Name".to_string()];

    let mut annotated1 = classify_rows(&side1, &side2, &mapping);
    sort_by_status(&mut annotated1);
    let annotated2 = classify_rows(&side2, &side1, &mapping.reversed());

    let columns1 = projected_columns(headers.len(), &[true, true], &mapping, Side::First, false);
    let columns2 = projected_columns(headers.len(), &[true, true], &mapping, Side::Second, false);

    let sheets = vec![
        ReportSheet {
            name: "File1".to_string(),
            headers: projected_headers(&headers, &columns1),
            columns: columns1,
            rows: annotated1,
        },
        ReportSheet {
            name: "File2".to_string(),
            headers: projected_headers(&headers, &columns2),
            columns: columns2,
            rows: annotated2,
        },
    ];

    write_report(&out, &sheets, &StyleOptions::default()).unwrap();

    let report = open_workbook(&out).unwrap();
    assert_eq!(report.sheet_names(), vec!["File1", "File2"]);

    let file1 = report.sheet(Some("File1")).unwrap();
    assert_eq!(
        file1.headers(),
        vec!["ID".to_string(), "Name".to_string(), "MatchType".to_string()]
    );
    // Sorted: Full first, then Partial, then No Match.
    let match_types: Vec<String> = file1
        .data_rows()
        .iter()
        .map(|r| r[2].to_display_string())
        .collect();
    assert_eq!(match_types, vec!["Full Match", "Partial Match", "No Match"]);
    assert_eq!(file1.data_rows()[0][1].to_display_string(), "Alice");
}

#[test]
fn mapped_only_projection_limits_report_columns() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("mapped.xlsx");

    let headers = vec!["ID".to_string(), "Name".to_string(), "Notes".to_string()];
    let mapping: ColumnMapping = [(0, 0)].into_iter().collect();
    let side1 = vec![vec![
        CellValue::Number(1.0),
        CellValue::Text("Alice".into()),
        CellValue::Text("ignored".into()),
    ]];
    let side2 = vec![vec![CellValue::Number(1.0)]];
    let annotated = classify_rows(&side1, &side2, &mapping);

    let columns = projected_columns(headers.len(), &[true, true], &mapping, Side::First, true);
    assert_eq!(columns, vec![0]);

    let sheets = vec![ReportSheet {
        name: "File1".to_string(),
        headers: projected_headers(&headers, &columns),
        columns,
        rows: annotated,
    }];
    write_report(&out, &sheets, &StyleOptions::default()).unwrap();

    let report = open_workbook(&out).unwrap();
    let sheet = report.sheet(Some("File1")).unwrap();
    assert_eq!(
        sheet.headers(),
        vec!["ID".to_string(), "MatchType".to_string()]
    );
}

#[test]
fn excluded_columns_stay_out_of_the_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("included_only.xlsx");

    let headers = vec!["ID".to_string(), "Name".to_string()];
    let include = [true, false];
    let mapping: ColumnMapping = [(0, 0)].into_iter().collect();
    let (side1, side2) = sample_sides();
    let annotated = classify_rows(&side1, &side2, &mapping);

    let columns = projected_columns(headers.len(), &include, &mapping, Side::First, false);
    assert_eq!(columns, vec![0]);

    let sheets = vec![ReportSheet {
        name: "File1".to_string(),
        headers: projected_headers(&headers, &columns),
        columns,
        rows: annotated,
    }];
    write_report(&out, &sheets, &StyleOptions::default()).unwrap();

    let report = open_workbook(&out).unwrap();
    let sheet = report.sheet(Some("File1")).unwrap();
    assert_eq!(
        sheet.headers(),
        vec!["ID".to_string(), "MatchType".to_string()]
    );
    for row in sheet.data_rows() {
        assert!(!row.iter().any(|c| c.to_display_string() == "Alice"));
    }
}

#[test]
fn split_export_writes_one_file_per_present_status() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("report.xlsx");

    let (side1, side2) = sample_sides();
    let mapping = identity_mapping();
    let headers = vec!["ID".to_string(), "Name".to_string()];
    let columns = projected_columns(headers.len(), &[true, true], &mapping, Side::First, false);

    let sheets = vec![ReportSheet {
        name: "File1".to_string(),
        headers: projected_headers(&headers, &columns),
        columns,
        rows: classify_rows(&side1, &side2, &mapping),
    }];

    let written = write_split_reports(&base, &sheets, &StyleOptions::default()).unwrap();
    assert_eq!(written.len(), 3);
    for suffix in ["fullmatch", "partialmatch", "nomatch"] {
        let path = dir.path().join(format!("report_file1_{suffix}.xlsx"));
        assert!(path.is_file(), "{} should exist", path.display());
        let report = open_workbook(&path).unwrap();
        assert_eq!(report.sheet(Some("File1")).unwrap().data_rows().len(), 1);
    }
}

#[test]
fn split_export_skips_statuses_with_no_rows() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("report.xlsx");

    let side1 = vec![row(1.0, "Alice")];
    let mapping = identity_mapping();
    let headers = vec!["ID".to_string(), "Name".to_string()];
    let columns = projected_columns(headers.len(), &[true, true], &mapping, Side::First, false);

    let sheets = vec![ReportSheet {
        name: "File1".to_string(),
        headers: projected_headers(&headers, &columns),
        columns,
        rows: classify_rows(&side1, &side1.clone(), &mapping),
    }];

    let written = write_split_reports(&base, &sheets, &StyleOptions::default()).unwrap();
    assert_eq!(written.len(), 1);
    assert!(dir.path().join("report_file1_fullmatch.xlsx").is_file());
    assert!(!dir.path().join("report_file1_nomatch.xlsx").exists());
}

#[test]
fn filtered_export_keeps_only_the_requested_status() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("partial_only.xlsx");

    let (side1, side2) = sample_sides();
    let mapping = identity_mapping();
    let headers = vec!["ID".to_string(), "Name".to_string()];
    let columns = projected_columns(headers.len(), &[true, true], &mapping, Side::First, false);

    let sheets = vec![ReportSheet {
        name: "File1".to_string(),
        headers: projected_headers(&headers, &columns),
        columns,
        rows: classify_rows(&side1, &side2, &mapping),
    }];

    write_filtered_report(&out, &sheets, &StyleOptions::default(), MatchStatus::Partial)
        .unwrap();

    let report = open_workbook(&out).unwrap();
    let sheet = report.sheet(Some("File1")).unwrap();
    assert_eq!(sheet.data_rows().len(), 1);
    assert_eq!(sheet.data_rows()[0][0].to_display_string(), "2");
    assert_eq!(sheet.data_rows()[0][2].to_display_string(), "Partial Match");
}

#[test]
fn out_of_range_projection_renders_blank_cells() {
    let headers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let short_row = vec![CellValue::Text("x".into())];
    let columns = vec![0, 2];
    let cells = project_row(&short_row, &columns);
    assert_eq!(cells, vec![CellValue::Text("x".into()), CellValue::Blank]);
    assert_eq!(
        projected_headers(&headers, &columns),
        vec!["A".to_string(), "C".to_string(), "MatchType".to_string()]
    );
}
