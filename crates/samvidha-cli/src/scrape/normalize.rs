//! Row normalization
//!
//! Turns a located table into uniform records. Two shapes exist on the
//! portal: label/value pairs (the student info block) and header-plus-rows
//! grids (course attendance, attendance register). Both come back as
//! [`Record`]s with a stable key order.

use regex::Regex;

use crate::models::Record;
use crate::scrape::dom::Table;
use crate::scrape::locate::row_matches;

/// Flatten a label/value table into a single record. Cells are consumed in
/// pairs per row; a trailing unpaired cell is ignored. Keys lose a trailing
/// colon, and repeated labels keep their first position with the last value.
pub fn info_pairs(table: &Table) -> Record {
    let mut record = Record::new();
    for row in &table.rows {
        for pair in row.chunks(2) {
            let [key, value] = pair else { continue };
            let key = key.strip_suffix(':').unwrap_or(key.as_str()).trim();
            if key.is_empty() {
                continue;
            }
            record.insert(key.to_string(), value.clone());
        }
    }
    record
}

/// Normalize a grid table into one record per data row.
///
/// The header row is the first row matching `header_hints` when hints are
/// given (first row otherwise). A literal `Date` column is dropped from
/// both the header and every row. Date-style labels like `01-Dec` become
/// `Dec 2`: the portal prints register dates one day behind the academic
/// calendar, so the day number is shifted forward without any month
/// rollover. Rows with fewer than `min_cells` raw cells are skipped; the
/// rest are padded or truncated to the header width.
pub fn normalize(
    table: &Table,
    header_hints: Option<&[&str]>,
    min_cells: usize,
) -> (Vec<String>, Vec<Record>) {
    let Some(header_index) = find_header_row(table, header_hints) else {
        return (Vec::new(), Vec::new());
    };

    let mut header = Vec::new();
    let mut dropped_column = None;
    for (index, label) in table.rows[header_index].iter().enumerate() {
        if label == "Date" && dropped_column.is_none() {
            dropped_column = Some(index);
        } else {
            header.push(shift_date_label(label));
        }
    }

    let mut records = Vec::new();
    for row in &table.rows[header_index + 1..] {
        if row.len() < min_cells {
            continue;
        }
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        if let Some(index) = dropped_column {
            if index < cells.len() {
                cells.remove(index);
            }
        }
        let mut record = Record::new();
        for (position, key) in header.iter().enumerate() {
            let value = cells.get(position).copied().unwrap_or("");
            record.insert(key.clone(), value.to_string());
        }
        records.push(record);
    }

    (header, records)
}

fn find_header_row(table: &Table, header_hints: Option<&[&str]>) -> Option<usize> {
    if table.rows.is_empty() {
        return None;
    }
    if let Some(hints) = header_hints {
        if let Some(index) = table
            .rows
            .iter()
            .position(|row| row_matches(row, hints))
        {
            return Some(index);
        }
    }
    Some(0)
}

/// `"01-Dec"` -> `"Dec 2"`. Anything else passes through untouched.
fn shift_date_label(label: &str) -> String {
    let pattern = Regex::new(r"^(\d{1,2})-([A-Za-z]{3})$").unwrap();
    if let Some(captures) = pattern.captures(label) {
        if let Ok(day) = captures[1].parse::<u32>() {
            return format!("{} {}", &captures[2], day + 1);
        }
    }
    label.to_string()
}
