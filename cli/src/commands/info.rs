//! The `info` subcommand: workbook structure at a glance.

use anyhow::{Context, Result};
use clap::Args;
use excel_match::open_workbook;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// Workbook to inspect
    pub file: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let workbook =
        open_workbook(&args.file).with_context(|| format!("failed to load {}", args.file.display()))?;

    println!("{}", args.file.display());
    for sheet in &workbook.sheets {
        println!(
            "  {} ({} rows x {} cols)",
            sheet.name,
            sheet.nrows(),
            sheet.ncols()
        );
        let headers = sheet.headers();
        if !headers.is_empty() {
            println!("    headers: {}", headers.join(", "));
        }
    }

    Ok(())
}
