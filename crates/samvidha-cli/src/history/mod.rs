//! Attendance history
//!
//! Keeps one (overall, biometric) percentage pair per logical day so
//! trends survive across runs. This module owns the day-boundary rule and
//! the merge algorithm; [`store`] persists the log whole.

pub mod store;

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

pub use store::HistoryDb;

/// Observations before this local hour count towards the previous day.
/// The portal does not finalize "today" until early next morning.
pub const DAY_ROLLOVER_HOUR: u32 = 6;

/// One day's percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// ISO calendar date, day granularity
    pub date: String,
    pub overall: f64,
    pub biometric: f64,
}

/// Calendar day an observation belongs to, after the rollover shift
pub fn logical_date(observed_at: DateTime<Local>) -> NaiveDate {
    let date = observed_at.date_naive();
    if observed_at.hour() < DAY_ROLLOVER_HOUR {
        date - Duration::days(1)
    } else {
        date
    }
}

/// Merge one observation into the log and return the new full log.
///
/// A missing entry for the day before the observation is backfilled with
/// the observed values; yesterday's true numbers are not recoverable from
/// the portal, so today's stand in for them. The observation day itself is
/// overwritten in place when present. Dates stay unique and the log comes
/// back sorted ascending.
pub fn record_observation(
    mut history: Vec<HistoryEntry>,
    observed_at: DateTime<Local>,
    overall: f64,
    biometric: f64,
) -> Vec<HistoryEntry> {
    let today = logical_date(observed_at);
    let yesterday = (today - Duration::days(1)).to_string();
    let today = today.to_string();

    if !history.iter().any(|entry| entry.date == yesterday) {
        history.push(HistoryEntry {
            date: yesterday,
            overall,
            biometric,
        });
    }

    match history.iter_mut().find(|entry| entry.date == today) {
        Some(entry) => {
            entry.overall = overall;
            entry.biometric = biometric;
        }
        None => history.push(HistoryEntry {
            date: today,
            overall,
            biometric,
        }),
    }

    history.sort_by(|a, b| a.date.cmp(&b.date));
    history
}
