//! Assembled output of one scrape cycle

use serde::{Deserialize, Serialize};

use crate::models::{Record, StudentInfo};

/// Summary of the biometric punch-in log.
///
/// `adjusted` is `count - 1`: the portal's table ends with a totals row that
/// passes the cell-count filter, so one counted row is discounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricSummary {
    /// Data rows with at least two cells
    pub count: u32,
    /// `count` minus the trailing totals row
    pub adjusted: i64,
    /// Counted rows marked "Present"
    pub present: u32,
    /// `present / adjusted * 100`, 0.0 when `adjusted <= 0`
    pub percentage: f64,
}

/// Everything one scrape of the portal produces
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub student_info: StudentInfo,
    pub course_attendance: Vec<Record>,
    pub overall_average: f64,
    pub biometric: Option<BiometricSummary>,
    pub register: Vec<Record>,
}
