//! Column selection for report output.
//!
//! Reports carry the included columns of a sheet, or only the mapped ones.
//! Columns excluded by the inclusion mask never reach a report. The mapped
//! selection is side-dependent: the first sheet's mapped columns are the
//! mapping keys, the second sheet's are the mapping values. A mapped
//! selection that comes up empty falls back to all included columns so the
//! report is never a bare MatchType column.

use crate::mapping::ColumnMapping;
use crate::workbook::CellValue;
use std::collections::BTreeSet;

/// Which sheet of the comparison a projection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Column indices to include in a report sheet, ascending. Columns the
/// inclusion mask excludes are dropped from both selections; a mask entry
/// past its end counts as included.
pub fn projected_columns(
    ncols: usize,
    include: &[bool],
    mapping: &ColumnMapping,
    side: Side,
    mapped_only: bool,
) -> Vec<usize> {
    let included = |c: usize| include.get(c).copied().unwrap_or(true);
    if mapped_only {
        let selected: BTreeSet<usize> = match side {
            Side::First => mapping.iter().map(|(a, _)| a).collect(),
            Side::Second => mapping.iter().map(|(_, b)| b).collect(),
        };
        let selected: Vec<usize> = selected
            .into_iter()
            .filter(|&c| c < ncols && included(c))
            .collect();
        if !selected.is_empty() {
            return selected;
        }
    }
    (0..ncols).filter(|&c| included(c)).collect()
}

/// Pull the selected cells out of a row; indices past the row's end become
/// blanks.
pub fn project_row(row: &[CellValue], columns: &[usize]) -> Vec<CellValue> {
    columns
        .iter()
        .map(|&c| row.get(c).cloned().unwrap_or(CellValue::Blank))
        .collect()
}

/// Header labels for the selected columns with the MatchType column added.
pub fn projected_headers(headers: &[String], columns: &[usize]) -> Vec<String> {
    let mut out: Vec<String> = columns
        .iter()
        .map(|&c| headers.get(c).cloned().unwrap_or_default())
        .collect();
    out.push("MatchType".to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(usize, usize)]) -> ColumnMapping {
        pairs.iter().copied().collect()
    }

    const ALL: &[bool] = &[true; 8];

    #[test]
    fn all_included_columns_when_not_mapped_only() {
        let cols = projected_columns(3, ALL, &mapping(&[(0, 2)]), Side::First, false);
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn excluded_columns_never_reach_the_selection() {
        let include = [true, false, true];
        let cols = projected_columns(3, &include, &ColumnMapping::new(), Side::First, false);
        assert_eq!(cols, vec![0, 2]);

        let cols = projected_columns(3, &include, &mapping(&[(0, 0), (1, 1)]), Side::First, true);
        assert_eq!(cols, vec![0]);
    }

    #[test]
    fn mapped_only_selects_keys_on_first_side() {
        let cols = projected_columns(4, ALL, &mapping(&[(2, 0), (0, 1)]), Side::First, true);
        assert_eq!(cols, vec![0, 2]);
    }

    #[test]
    fn mapped_only_selects_values_on_second_side() {
        let cols = projected_columns(4, ALL, &mapping(&[(2, 0), (0, 3)]), Side::Second, true);
        assert_eq!(cols, vec![0, 3]);
    }

    #[test]
    fn duplicate_targets_collapse_on_second_side() {
        let cols = projected_columns(4, ALL, &mapping(&[(0, 1), (2, 1)]), Side::Second, true);
        assert_eq!(cols, vec![1]);
    }

    #[test]
    fn empty_mapped_selection_falls_back_to_included_columns() {
        let cols = projected_columns(2, ALL, &ColumnMapping::new(), Side::First, true);
        assert_eq!(cols, vec![0, 1]);

        // Mapped columns that are all out of range also fall back.
        let cols = projected_columns(2, ALL, &mapping(&[(5, 0)]), Side::First, true);
        assert_eq!(cols, vec![0, 1]);

        // The fallback honors the mask too.
        let cols = projected_columns(2, &[false, true], &ColumnMapping::new(), Side::First, true);
        assert_eq!(cols, vec![1]);
    }

    #[test]
    fn project_row_fills_missing_cells_with_blank() {
        let row = vec![CellValue::Text("a".into()), CellValue::Number(1.0)];
        let cells = project_row(&row, &[1, 5]);
        assert_eq!(cells, vec![CellValue::Number(1.0), CellValue::Blank]);
    }

    #[test]
    fn projected_headers_append_match_type() {
        let headers = vec!["ID".to_string(), "Name".to_string()];
        assert_eq!(
            projected_headers(&headers, &[1]),
            vec!["Name".to_string(), "MatchType".to_string()]
        );
    }
}
