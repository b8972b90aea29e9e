pub mod record;
pub mod report;

pub use record::{Record, StudentInfo};
pub use report::{AttendanceReport, BiometricSummary};
