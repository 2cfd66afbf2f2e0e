//! The `compare` subcommand: the full load, map, classify, export pipeline.

use crate::commands::UsageError;
use crate::output::{self, SideSummary, Summary};
use crate::{FilterStatus, OutputFormat, default_settings_path};
use anyhow::{Context, Result};
use clap::Args;
use excel_match::addressing::column_letters;
use excel_match::{
    ColumnMapping, MappingProfile, MatchCounts, ReportSheet, Settings, Sheet, Side,
    classify_rows, open_workbook, projected_columns, projected_headers, push_recent,
    sort_by_status, suggest_mapping_masked, write_filtered_report, write_report,
    write_split_reports,
};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CompareArgs {
    /// First workbook
    pub file1: PathBuf,
    /// Second workbook
    pub file2: PathBuf,

    /// Report output path
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Sheet name in the first workbook (default: first sheet)
    #[arg(long)]
    pub sheet1: Option<String>,
    /// Sheet name in the second workbook (default: first sheet)
    #[arg(long)]
    pub sheet2: Option<String>,

    /// Suggest a mapping from headers when none is configured
    #[arg(long)]
    pub suggest: bool,
    /// Load mapping and inclusion masks from a profile file
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Report only mapped columns
    #[arg(long)]
    pub mapped_only: bool,
    /// Sort report rows by match status
    #[arg(long)]
    pub sort: bool,
    /// Also write one workbook per side and match status
    #[arg(long)]
    pub split: bool,

    /// Also write a workbook holding only rows of this status
    #[arg(long, value_enum)]
    pub filter: Option<FilterStatus>,
    /// Output path for the filtered workbook
    #[arg(long)]
    pub filter_output: Option<PathBuf>,

    /// Settings file path
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Dashboard format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress the dashboard
    #[arg(short, long)]
    pub quiet: bool,
    /// Print the resolved mapping to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(args: CompareArgs) -> Result<()> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(default_settings_path);
    let mut settings = Settings::load(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    let sheet_name1 = args.sheet1.clone().or(settings.sheet1.clone());
    let sheet_name2 = args.sheet2.clone().or(settings.sheet2.clone());

    let sheet1 = load_sheet(&args.file1, sheet_name1.as_deref())?;
    let sheet2 = load_sheet(&args.file2, sheet_name2.as_deref())?;

    let headers1 = sheet1.headers();
    let headers2 = sheet2.headers();

    let (mut mapping, include1, include2) = resolve_mapping(&args, &settings, &headers1, &headers2)?;
    mapping.retain_included(&include1, &include2);

    if args.verbose {
        for (a, b) in mapping.iter() {
            let left = headers1.get(a).map(String::as_str).unwrap_or("?");
            let right = headers2.get(b).map(String::as_str).unwrap_or("?");
            eprintln!(
                "mapping: {left} [{}] -> {right} [{}]",
                column_letters(a),
                column_letters(b)
            );
        }
    }
    if mapping.is_empty() && !args.quiet {
        eprintln!("warning: column mapping is empty; every row will be No Match");
    }

    let mut annotated1 = classify_rows(sheet1.data_rows(), sheet2.data_rows(), &mapping);
    let mut annotated2 =
        classify_rows(sheet2.data_rows(), sheet1.data_rows(), &mapping.reversed());

    let counts1 = MatchCounts::tally(&annotated1);
    let counts2 = MatchCounts::tally(&annotated2);

    if args.sort || settings.sort_results {
        sort_by_status(&mut annotated1);
        sort_by_status(&mut annotated2);
    }

    let mapped_only = args.mapped_only || settings.mapped_only;
    let columns1 = projected_columns(headers1.len(), &include1, &mapping, Side::First, mapped_only);
    let columns2 = projected_columns(headers2.len(), &include2, &mapping, Side::Second, mapped_only);

    let sheets = vec![
        ReportSheet {
            name: "File1".to_string(),
            headers: projected_headers(&headers1, &columns1),
            columns: columns1,
            rows: annotated1,
        },
        ReportSheet {
            name: "File2".to_string(),
            headers: projected_headers(&headers2, &columns2),
            columns: columns2,
            rows: annotated2,
        },
    ];

    write_report(&args.output, &sheets, &settings.style)
        .with_context(|| format!("failed to write report to {}", args.output.display()))?;

    let split_reports = if args.split || settings.split_output {
        write_split_reports(&args.output, &sheets, &settings.style)
            .context("failed to write split reports")?
    } else {
        Vec::new()
    };

    let filter = args.filter.map(FilterStatus::as_status).or(settings.filter);
    let filtered_report = match filter {
        Some(status) => {
            let path = args
                .filter_output
                .clone()
                .or_else(|| settings.filter_output.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| default_filter_path(&args.output));
            write_filtered_report(&path, &sheets, &settings.style, status)
                .with_context(|| format!("failed to write filtered report to {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    settings.mapping = mapping;
    settings.include1 = include1;
    settings.include2 = include2;
    settings.sheet1 = sheet_name1;
    settings.sheet2 = sheet_name2;
    push_recent(&mut settings.recent_files, &args.file1.to_string_lossy());
    push_recent(&mut settings.recent_files, &args.file2.to_string_lossy());
    push_recent(&mut settings.recent_outputs, &args.output.to_string_lossy());
    if let Some(path) = &filtered_report {
        push_recent(
            &mut settings.recent_filter_outputs,
            &path.to_string_lossy(),
        );
    }
    settings
        .save(&settings_path)
        .with_context(|| format!("failed to save settings to {}", settings_path.display()))?;

    let summary = Summary {
        sides: vec![
            side_summary("File 1", &args.file1, &sheet1, counts1),
            side_summary("File 2", &args.file2, &sheet2, counts2),
        ],
        report: args.output.clone(),
        split_reports,
        filtered_report,
    };

    if !args.quiet {
        match args.format {
            OutputFormat::Text => print!("{}", output::text::render(&summary)),
            OutputFormat::Json => println!("{}", output::json::render(&summary)?),
        }
    }

    Ok(())
}

/// Load one side of the comparison. A file that cannot be opened is treated
/// as an empty sheet with a warning, so a typo on one side still produces a
/// report for the other. A missing sheet name in a loaded workbook is a
/// user error.
fn load_sheet(path: &Path, sheet_name: Option<&str>) -> Result<Sheet> {
    let workbook = match open_workbook(path) {
        Ok(wb) => wb,
        Err(err) => {
            eprintln!(
                "warning: failed to load {}: {err}; treating it as empty",
                path.display()
            );
            return Ok(Sheet::new("", Vec::new()));
        }
    };
    match workbook.sheet(sheet_name) {
        Some(sheet) => Ok(sheet.clone()),
        None => Err(UsageError(format!(
            "sheet {:?} not found in {} (available: {})",
            sheet_name.unwrap_or(""),
            path.display(),
            workbook.sheet_names().join(", ")
        ))
        .into()),
    }
}

fn resolve_mapping(
    args: &CompareArgs,
    settings: &Settings,
    headers1: &[String],
    headers2: &[String],
) -> Result<(ColumnMapping, Vec<bool>, Vec<bool>)> {
    if let Some(profile_path) = &args.profile {
        let profile = MappingProfile::load(profile_path)
            .with_context(|| format!("failed to load profile {}", profile_path.display()))?;
        let include1 = MappingProfile::mask_for(&profile.include1, headers1.len());
        let include2 = MappingProfile::mask_for(&profile.include2, headers2.len());
        return Ok((profile.mapping, include1, include2));
    }

    let include1 = resize_mask(&settings.include1, headers1.len());
    let include2 = resize_mask(&settings.include2, headers2.len());

    let mut mapping = settings.mapping.clone();
    if mapping.is_empty() && args.suggest {
        mapping = suggest_mapping_masked(headers1, headers2, &include1, &include2);
    }
    Ok((mapping, include1, include2))
}

fn resize_mask(saved: &[bool], ncols: usize) -> Vec<bool> {
    (0..ncols)
        .map(|i| saved.get(i).copied().unwrap_or(true))
        .collect()
}

fn default_filter_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    output.with_file_name(format!("{stem}_filtered.xlsx"))
}

fn side_summary(label: &str, path: &Path, sheet: &Sheet, counts: MatchCounts) -> SideSummary {
    SideSummary {
        label: label.to_string(),
        path: path.display().to_string(),
        sheet: sheet.name.clone(),
        counts,
    }
}
