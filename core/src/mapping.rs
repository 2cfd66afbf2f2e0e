//! Column mapping between two sheets.
//!
//! A [`ColumnMapping`] relates columns of the first sheet to columns of the
//! second by zero-based index. Mappings can be suggested automatically from
//! header labels: exact case-insensitive matches win, otherwise the closest
//! header by edit-distance similarity is taken when it clears a 0.8
//! threshold. Suggestion is per-source-column, so two source columns may map
//! to the same target column.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Mapping from source column index to target column index. Ordered by
/// source index so iteration and serialization are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<usize, usize>);

impl ColumnMapping {
    pub fn new() -> ColumnMapping {
        ColumnMapping::default()
    }

    pub fn insert(&mut self, source: usize, target: usize) {
        self.0.insert(source, target);
    }

    pub fn get(&self, source: usize) -> Option<usize> {
        self.0.get(&source).copied()
    }

    pub fn remove(&mut self, source: usize) -> Option<usize> {
        self.0.remove(&source)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in ascending source-column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&a, &b)| (a, b))
    }

    /// The swapped mapping, used to classify the second sheet against the
    /// first. When several source columns map to one target the highest
    /// source wins the reversed slot.
    pub fn reversed(&self) -> ColumnMapping {
        ColumnMapping(self.0.iter().map(|(&a, &b)| (b, a)).collect())
    }

    /// Drop pairs whose endpoints fall outside the given inclusion masks.
    /// An index at or beyond a mask's length counts as excluded.
    pub fn retain_included(&mut self, include_source: &[bool], include_target: &[bool]) {
        self.0.retain(|&a, b| {
            include_source.get(a).copied().unwrap_or(false)
                && include_target.get(*b).copied().unwrap_or(false)
        });
    }
}

impl FromIterator<(usize, usize)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> ColumnMapping {
        ColumnMapping(iter.into_iter().collect())
    }
}

/// Suggest a mapping from one header row to another.
///
/// Each source header is matched independently: an exact case-insensitive
/// match is preferred; failing that, the most similar target header is used
/// when its similarity is at least 0.8. Headers with no acceptable candidate
/// are left unmapped.
pub fn suggest_mapping(source_headers: &[String], target_headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for (i, header) in source_headers.iter().enumerate() {
        if let Some(j) = best_match(header, target_headers) {
            mapping.insert(i, j);
        }
    }
    mapping
}

/// Suggest a mapping over the included subset of each header row, expressed
/// in absolute column indices. Excluded headers neither receive suggestions
/// nor act as candidates.
pub fn suggest_mapping_masked(
    source_headers: &[String],
    target_headers: &[String],
    include_source: &[bool],
    include_target: &[bool],
) -> ColumnMapping {
    let included = |headers: &[String], mask: &[bool]| -> Vec<(usize, String)> {
        headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask.get(i).copied().unwrap_or(false))
            .map(|(i, h)| (i, h.clone()))
            .collect()
    };
    let sources = included(source_headers, include_source);
    let targets = included(target_headers, include_target);
    let target_labels: Vec<String> = targets.iter().map(|(_, h)| h.clone()).collect();

    let mut mapping = ColumnMapping::new();
    for (abs_i, header) in &sources {
        if let Some(rel_j) = best_match(header, &target_labels) {
            mapping.insert(*abs_i, targets[rel_j].0);
        }
    }
    mapping
}

fn best_match(header: &str, candidates: &[String]) -> Option<usize> {
    let folded = header.trim().to_lowercase();
    for (j, candidate) in candidates.iter().enumerate() {
        if candidate.trim().to_lowercase() == folded {
            return Some(j);
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (j, candidate) in candidates.iter().enumerate() {
        let score = text_similarity(&folded, &candidate.trim().to_lowercase());
        if score >= SIMILARITY_THRESHOLD {
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((j, score)),
            }
        }
    }
    best.map(|(j, _)| j)
}

/// Normalized similarity in `[0, 1]` from Levenshtein distance over chars.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    let dist = levenshtein_distance(&a_chars, &b_chars);
    1.0 - dist as f64 / max_len as f64
}

fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
