//! The `suggest` subcommand: header-based mapping suggestion.

use anyhow::{Context, Result};
use clap::Args;
use excel_match::{MappingProfile, open_workbook, suggest_mapping};
use std::path::PathBuf;

#[derive(Args)]
pub struct SuggestArgs {
    /// First workbook
    pub file1: PathBuf,
    /// Second workbook
    pub file2: PathBuf,

    /// Sheet name in the first workbook (default: first sheet)
    #[arg(long)]
    pub sheet1: Option<String>,
    /// Sheet name in the second workbook (default: first sheet)
    #[arg(long)]
    pub sheet2: Option<String>,

    /// Save the suggestion as a mapping profile
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: SuggestArgs) -> Result<()> {
    let headers1 = load_headers(&args.file1, args.sheet1.as_deref())?;
    let headers2 = load_headers(&args.file2, args.sheet2.as_deref())?;

    let mapping = suggest_mapping(&headers1, &headers2);
    if mapping.is_empty() {
        println!("No column pairs suggested.");
    }
    for (a, b) in mapping.iter() {
        println!("{} ({a}) -> {} ({b})", headers1[a], headers2[b]);
    }

    if let Some(path) = &args.save {
        let profile = MappingProfile {
            include1: vec![true; headers1.len()],
            include2: vec![true; headers2.len()],
            headers1,
            headers2,
            mapping,
        };
        profile
            .save(path)
            .with_context(|| format!("failed to save profile to {}", path.display()))?;
        println!("Profile saved to {}", path.display());
    }

    Ok(())
}

fn load_headers(path: &std::path::Path, sheet: Option<&str>) -> Result<Vec<String>> {
    let workbook =
        open_workbook(path).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(workbook
        .sheet(sheet)
        .map(|s| s.headers())
        .unwrap_or_default())
}
