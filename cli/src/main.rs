//! Command-line entry point.
//!
//! Exit codes: 0 on success, 2 for user errors (bad paths, malformed input
//! files, unknown sheets), 3 for internal failures.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "excel-match",
    version,
    about = "Compare spreadsheet rows across two .xlsx files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two workbooks and write a styled match report
    Compare(commands::compare::CompareArgs),
    /// Suggest a column mapping from header labels
    Suggest(commands::suggest::SuggestArgs),
    /// Show sheets, dimensions, and headers of a workbook
    Info(commands::info::InfoArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Match statuses selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterStatus {
    Full,
    Partial,
    None,
}

impl FilterStatus {
    pub fn as_status(self) -> excel_match::MatchStatus {
        match self {
            FilterStatus::Full => excel_match::MatchStatus::Full,
            FilterStatus::Partial => excel_match::MatchStatus::Partial,
            FilterStatus::None => excel_match::MatchStatus::None,
        }
    }
}

/// Default settings path when `--settings` is not given.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("excel-match-settings.json")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Info(args) => commands::info::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            ExitCode::from(exit_code_for_error(&err))
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.is::<excel_match::WorkbookError>()
            || cause.is::<excel_match::ContainerError>()
            || cause.is::<excel_match::SettingsError>()
            || cause.is::<commands::UsageError>()
        {
            return 2;
        }
    }
    3
}
