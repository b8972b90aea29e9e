//! Attendance report command

use std::path::PathBuf;

use chrono::Local;

use crate::error::Result;
use crate::history::store::resolve_history_path;
use crate::history::{record_observation, HistoryDb};
use crate::models::AttendanceReport;
use crate::scrape::metrics::{course_standing, CourseStanding, PERCENTAGE_COLUMN};
use crate::scrape::ScrapeEngine;

use super::auth::load_provider;

/// Execute the report command: scrape the portal once, show the result,
/// and record the day's percentages into history unless asked not to.
pub async fn report(
    json: bool,
    no_record: bool,
    db_path: Option<String>,
    profile: Option<String>,
    portal_url: Option<String>,
) -> Result<()> {
    let provider = load_provider(profile, portal_url)?;
    let client = provider.session().await?;
    let report = ScrapeEngine::new(client).run().await?;

    if !no_record {
        let path = resolve_history_path(db_path.map(PathBuf::from))?;
        let mut db = HistoryDb::open(path)?;

        let biometric = report
            .biometric
            .as_ref()
            .map(|summary| summary.percentage)
            .unwrap_or(0.0);
        let history = db.load()?;
        let history = record_observation(history, Local::now(), report.overall_average, biometric);
        db.replace_all(&history)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &AttendanceReport) {
    println!("Student: {}", report.student_info.name().unwrap_or("-"));
    if let Some(roll) = report.student_info.roll_no() {
        println!("Roll No: {}", roll);
    }

    if report.course_attendance.is_empty() {
        println!("\nNo course attendance rows found.");
    } else {
        println!();
        println!(
            "{:<10} {:<28} {:>10} {:>9} {:>8}  {}",
            "Code", "Course", "Conducted", "Attended", "%", "Margin"
        );
        println!("{}", "-".repeat(78));

        for record in &report.course_attendance {
            let code = record.value_at(0).unwrap_or("-");
            let name = record.value_at(1).unwrap_or("-");
            let percentage = record.value_at(PERCENTAGE_COLUMN).unwrap_or("-");

            let (conducted, attended, margin) = match course_standing(record) {
                Some(standing) => (
                    standing.conducted.to_string(),
                    standing.attended.to_string(),
                    margin_label(&standing),
                ),
                None => ("-".to_string(), "-".to_string(), String::new()),
            };

            println!(
                "{:<10} {:<28} {:>10} {:>9} {:>8}  {}",
                truncate(code, 10),
                truncate(name, 28),
                conducted,
                attended,
                percentage,
                margin
            );
        }

        println!("{}", "-".repeat(78));
    }

    println!("Overall average: {:.2}%", report.overall_average);

    match &report.biometric {
        Some(summary) => println!(
            "Biometric: {}/{} days present ({:.2}%)",
            summary.present,
            summary.adjusted.max(0),
            summary.percentage
        ),
        None => println!("Biometric: no data"),
    }

    println!("Register entries: {}", report.register.len());
}

/// Skip/catch-up margin against the 75% requirement, as a short label
fn margin_label(standing: &CourseStanding) -> String {
    if standing.must_attend > 0 {
        format!("attend {} more", standing.must_attend)
    } else {
        format!("can skip {}", standing.can_skip)
    }
}

/// Truncate string to max length
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("very long course name here", 10), "very lo...");
    }

    #[test]
    fn test_margin_label() {
        let standing = CourseStanding {
            conducted: 40,
            attended: 36,
            can_skip: 8,
            must_attend: 0,
        };
        assert_eq!(margin_label(&standing), "can skip 8");

        let standing = CourseStanding {
            conducted: 40,
            attended: 25,
            can_skip: 0,
            must_attend: 20,
        };
        assert_eq!(margin_label(&standing), "attend 20 more");
    }
}
