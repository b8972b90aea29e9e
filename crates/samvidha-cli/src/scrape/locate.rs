//! Table location
//!
//! Portal pages carry decoy tables (notice banners, layout scaffolding)
//! around the one we want. The locator picks the right table out of the
//! extracted list by keyword hints, falling back to the widest table when
//! no hint matches.

use crate::scrape::dom::Table;

/// Strategy for picking the table of interest out of an extracted page.
pub trait TableLocator {
    /// Index of the best candidate table, or `None` when nothing qualifies.
    /// Tables with zero rows are never candidates.
    fn locate(&self, tables: &[Table], hints: &[&str]) -> Option<usize>;
}

/// Case-insensitive test: does the joined row text contain every hint?
pub(crate) fn row_matches(row: &[String], hints: &[&str]) -> bool {
    let row_text = row.join(" ").to_lowercase();
    hints
        .iter()
        .all(|hint| row_text.contains(&hint.to_lowercase()))
}

/// Default locator: first table whose first-row text contains every hint
/// (case-insensitive substring match), otherwise the table with the widest
/// first row. With no hints, the first non-empty table wins.
pub struct KeywordLocator;

impl TableLocator for KeywordLocator {
    fn locate(&self, tables: &[Table], hints: &[&str]) -> Option<usize> {
        // An empty hint set matches vacuously, so it selects the first
        // non-empty table
        for (index, table) in tables.iter().enumerate() {
            let Some(first_row) = table.first_row() else {
                continue;
            };
            if row_matches(first_row, hints) {
                return Some(index);
            }
        }

        // Nothing matched: widest first row, earliest on ties
        let mut best: Option<(usize, usize)> = None;
        for (index, table) in tables.iter().enumerate() {
            let Some(first_row) = table.first_row() else {
                continue;
            };
            match best {
                Some((_, width)) if width >= first_row.len() => {}
                _ => best = Some((index, first_row.len())),
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_hints_pick_first_matching_table() {
        let tables = vec![
            table(&[&["Notice", "Date"]]),
            table(&[&["Course Code", "Course Name", "Attendance %"]]),
            table(&[&["Course Code", "Course Name", "Attendance %"]]),
        ];

        let index = KeywordLocator.locate(&tables, &["course", "attendance"]);
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_hint_matching_is_case_insensitive_substring() {
        let tables = vec![table(&[&["COURSE CODE", "ATTENDANCE PERCENTAGE"]])];

        assert_eq!(KeywordLocator.locate(&tables, &["course", "attend"]), Some(0));
    }

    #[test]
    fn test_all_hints_must_match_same_first_row() {
        let tables = vec![
            table(&[&["Course Code"], &["Attendance %"]]),
            table(&[&["Course Code", "Attendance %"]]),
        ];

        let index = KeywordLocator.locate(&tables, &["course", "attendance"]);
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_unmatched_hints_fall_back_to_widest_first_row() {
        let tables = vec![
            table(&[&["a", "b"]]),
            table(&[&["a", "b", "c", "d"]]),
            table(&[&["a", "b", "c"]]),
        ];

        let index = KeywordLocator.locate(&tables, &["no such hint"]);
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_widest_tie_keeps_earliest_table() {
        let tables = vec![
            table(&[&["a", "b", "c"]]),
            table(&[&["d", "e", "f"]]),
        ];

        assert_eq!(KeywordLocator.locate(&tables, &["missing"]), Some(0));
    }

    #[test]
    fn test_empty_hints_pick_first_non_empty_table() {
        let tables = vec![Table::default(), table(&[&["only cell"]])];

        assert_eq!(KeywordLocator.locate(&tables, &[]), Some(1));
    }

    #[test]
    fn test_zero_row_tables_are_never_candidates() {
        let tables = vec![Table::default(), Table::default()];

        assert_eq!(KeywordLocator.locate(&tables, &["anything"]), None);
        assert_eq!(KeywordLocator.locate(&tables, &[]), None);
    }

    #[test]
    fn test_no_tables() {
        assert_eq!(KeywordLocator.locate(&[], &["course"]), None);
    }
}
