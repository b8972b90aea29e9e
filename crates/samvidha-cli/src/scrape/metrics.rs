//! Derived metrics
//!
//! Scalar summaries computed from normalized records: the overall
//! attendance average, the biometric presence summary, and the 75%
//! attendance margin used by the report view.

use crate::models::{BiometricSummary, Record};
use crate::scrape::dom::Table;

/// Column index of the attendance percentage in a course record (0-based).
pub const PERCENTAGE_COLUMN: usize = 7;

/// Minimum attendance fraction required by the institute.
const REQUIRED_RATIO_NUM: u32 = 3;
const REQUIRED_RATIO_DEN: u32 = 4;

/// Mean of the percentage column across course records, rounded to two
/// decimals. Cells that fail to parse are skipped; if nothing parses the
/// average is 0.0.
pub fn course_average(records: &[Record]) -> f64 {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.value_at(PERCENTAGE_COLUMN))
        .filter_map(|value| value.trim().parse::<f64>().ok())
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// Count the biometric table's data rows (everything after the header row
/// with at least 2 cells) and how many of them carry a "Present" marker.
pub fn biometric_summary(table: &Table) -> BiometricSummary {
    let mut count = 0u32;
    let mut present = 0u32;
    for row in table.rows.iter().skip(1) {
        if row.len() < 2 {
            continue;
        }
        count += 1;
        if row.iter().any(|cell| cell.contains("Present")) {
            present += 1;
        }
    }

    let adjusted = i64::from(count) - 1;
    let percentage = if adjusted > 0 {
        round2(f64::from(present) / adjusted as f64 * 100.0)
    } else {
        0.0
    };

    BiometricSummary {
        count,
        adjusted,
        present,
        percentage,
    }
}

/// A course's position against the 75% attendance requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStanding {
    pub conducted: u32,
    pub attended: u32,
    /// Periods that can still be missed without dropping below 75%.
    pub can_skip: u32,
    /// Consecutive periods to attend before reaching 75%.
    pub must_attend: u32,
}

/// Read conducted/attended counts out of a course record by header keyword
/// and derive the skip/catch-up margins. Returns `None` when the columns
/// are missing, zero, or inconsistent.
pub fn course_standing(record: &Record) -> Option<CourseStanding> {
    let conducted = numeric_field(record, &["conducted", "held"])?;
    let attended = numeric_field(record, &["attended"])?;
    if conducted == 0 || attended > conducted {
        return None;
    }

    // attended / (conducted + x) >= 3/4  =>  x <= 4*attended/3 - conducted
    let can_skip =
        (REQUIRED_RATIO_DEN * attended / REQUIRED_RATIO_NUM).saturating_sub(conducted);
    // (attended + x) / (conducted + x) >= 3/4  =>  x >= 3*conducted - 4*attended
    let must_attend =
        (REQUIRED_RATIO_NUM * conducted).saturating_sub(REQUIRED_RATIO_DEN * attended);

    Some(CourseStanding {
        conducted,
        attended,
        can_skip,
        must_attend,
    })
}

fn numeric_field(record: &Record, keywords: &[&str]) -> Option<u32> {
    record.iter().find_map(|(key, value)| {
        let key = key.to_lowercase();
        if keywords.iter().any(|keyword| key.contains(keyword)) {
            value.trim().parse::<u32>().ok()
        } else {
            None
        }
    })
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
