//! Persistent user settings.
//!
//! Settings live in one JSON file. A missing file means defaults; a present
//! but malformed file is an error the caller must surface, so a typo in a
//! hand-edited file is never silently replaced.

use crate::classify::MatchStatus;
use crate::mapping::ColumnMapping;
use crate::style::StyleOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Recent-file lists keep at most this many entries.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub style: StyleOptions,

    pub mapping: ColumnMapping,
    pub include1: Vec<bool>,
    pub include2: Vec<bool>,
    pub sheet1: Option<String>,
    pub sheet2: Option<String>,

    pub sort_results: bool,
    pub mapped_only: bool,
    pub split_output: bool,
    pub filter: Option<MatchStatus>,
    pub filter_output: Option<String>,

    pub recent_files: Vec<String>,
    pub recent_outputs: Vec<String>,
    pub recent_filter_outputs: Vec<String>,

    /// Window placement string from desktop builds of the tool. The CLI
    /// never displays a window; the value is only preserved across load and
    /// save.
    pub window_geometry: Option<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            theme: "light".to_string(),
            style: StyleOptions::default(),
            mapping: ColumnMapping::new(),
            include1: Vec::new(),
            include2: Vec::new(),
            sheet1: None,
            sheet2: None,
            sort_results: false,
            mapped_only: false,
            split_output: false,
            filter: None,
            filter_output: None,
            recent_files: Vec::new(),
            recent_outputs: Vec::new(),
            recent_filter_outputs: Vec::new(),
            window_geometry: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Append `entry` to a recent list: duplicates move to the end, the list is
/// truncated from the front past [`RECENT_LIMIT`].
pub fn push_recent(list: &mut Vec<String>, entry: &str) {
    list.retain(|e| e != entry);
    list.push(entry.to_string());
    if list.len() > RECENT_LIMIT {
        let excess = list.len() - RECENT_LIMIT;
        list.drain(..excess);
    }
}
