//! Per-page parsers
//!
//! One parser per portal page, each wiring the locator, normalizer and
//! metric helpers together. All three degrade to empty output on pages
//! they cannot make sense of; nothing in here errors.

use crate::models::{BiometricSummary, Record, StudentInfo};
use crate::scrape::dom::extract_tables;
use crate::scrape::locate::TableLocator;
use crate::scrape::metrics::{biometric_summary, course_average};
use crate::scrape::normalize::{info_pairs, normalize};

/// First-row keywords identifying the course attendance table.
pub const COURSE_HINTS: &[&str] = &["course", "attendance"];
/// First-row keywords identifying the attendance register table.
pub const REGISTER_HINTS: &[&str] = &["date", "period"];

/// Course rows narrower than this are layout noise, not subjects.
pub const COURSE_MIN_CELLS: usize = 8;
/// Register rows narrower than this are layout noise, not periods.
pub const REGISTER_MIN_CELLS: usize = 3;

/// Everything the attendance page yields in one pass.
#[derive(Debug, Clone)]
pub struct AttendancePage {
    pub student_info: StudentInfo,
    pub course_attendance: Vec<Record>,
    pub overall_average: f64,
}

/// Parse the main attendance page: the student info block, the course
/// table that follows it, and the overall average over the course rows.
pub fn parse_attendance_page(html: &str, locator: &dyn TableLocator) -> AttendancePage {
    let tables = extract_tables(html);

    let mut fields = Record::new();
    let mut course_attendance = Vec::new();
    if let Some(info_index) = locator.locate(&tables, &[]) {
        fields = info_pairs(&tables[info_index]);

        // The course table always renders below the info block
        let rest = &tables[info_index + 1..];
        if let Some(course_index) = locator.locate(rest, COURSE_HINTS) {
            let (_, records) = normalize(&rest[course_index], None, COURSE_MIN_CELLS);
            course_attendance = records;
        }
    }

    let overall_average = course_average(&course_attendance);
    AttendancePage {
        student_info: StudentInfo::from_fields(fields),
        course_attendance,
        overall_average,
    }
}

/// Parse the biometric page. `None` means the page had no usable table,
/// which the report treats as "no biometric data" rather than zero.
pub fn parse_biometric_page(html: &str, locator: &dyn TableLocator) -> Option<BiometricSummary> {
    let tables = extract_tables(html);
    let index = locator.locate(&tables, &[])?;
    Some(biometric_summary(&tables[index]))
}

/// Parse the attendance register page into one record per period row.
pub fn parse_register_page(html: &str, locator: &dyn TableLocator) -> Vec<Record> {
    let tables = extract_tables(html);
    let Some(index) = locator.locate(&tables, REGISTER_HINTS) else {
        return Vec::new();
    };
    let (_, records) = normalize(&tables[index], Some(REGISTER_HINTS), REGISTER_MIN_CELLS);
    records
}
