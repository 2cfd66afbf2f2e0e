//! Reusable mapping profiles.
//!
//! A profile snapshots the mapping and inclusion masks for one pair of
//! header rows, so the same comparison setup can be reapplied later or on
//! another machine. Profiles are JSON files independent of the settings
//! store.

use crate::mapping::ColumnMapping;
use crate::settings::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingProfile {
    pub headers1: Vec<String>,
    pub headers2: Vec<String>,
    pub mapping: ColumnMapping,
    pub include1: Vec<bool>,
    pub include2: Vec<bool>,
}

impl MappingProfile {
    pub fn load(path: impl AsRef<Path>) -> Result<MappingProfile, SettingsError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Inclusion mask for the current header count: profile entries applied
    /// positionally, missing positions defaulting to included.
    pub fn mask_for(saved: &[bool], ncols: usize) -> Vec<bool> {
        (0..ncols)
            .map(|i| saved.get(i).copied().unwrap_or(true))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");

        let profile = MappingProfile {
            headers1: vec!["ID".into(), "Name".into()],
            headers2: vec!["Id".into(), "Full Name".into()],
            mapping: [(0, 0), (1, 1)].into_iter().collect(),
            include1: vec![true, true],
            include2: vec![true, false],
        };
        profile.save(&path).unwrap();
        let loaded = MappingProfile::load(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn missing_profile_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            MappingProfile::load(dir.path().join("nope.json")),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn mask_for_clips_and_extends() {
        let saved = vec![false, true];
        assert_eq!(MappingProfile::mask_for(&saved, 1), vec![false]);
        assert_eq!(
            MappingProfile::mask_for(&saved, 4),
            vec![false, true, true, true]
        );
    }
}
