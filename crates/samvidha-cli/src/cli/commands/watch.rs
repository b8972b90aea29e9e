//! Periodic attendance watcher

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use tokio::time::MissedTickBehavior;

use crate::client::SessionProvider;
use crate::error::{Result, SamvidhaError};
use crate::history::store::resolve_history_path;
use crate::history::{record_observation, HistoryDb};
use crate::scrape::ScrapeEngine;

use super::auth::load_provider;

pub fn parse_interval(input: &str) -> Result<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SamvidhaError::invalid_param("Interval is required"));
    }

    let (number_part, unit) = input.split_at(input.len() - 1);
    let value: u64 = number_part.parse().map_err(|_| {
        SamvidhaError::invalid_param("Interval must be a number followed by s, m, or h")
    })?;

    if value == 0 {
        return Err(SamvidhaError::invalid_param(
            "Interval must be greater than 0",
        ));
    }

    let seconds = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 60 * 60,
        _ => {
            return Err(SamvidhaError::invalid_param(
                "Interval must end with s, m, or h",
            ))
        }
    };

    Ok(Duration::from_secs(seconds))
}

/// Scrape the portal on a fixed interval, recording each cycle into
/// history. Runs until interrupted; transient scrape failures are printed
/// and skipped, bad credentials stop the watch.
pub async fn watch(
    interval: String,
    db_path: Option<String>,
    profile: Option<String>,
    portal_url: Option<String>,
) -> Result<()> {
    let interval = parse_interval(&interval)?;
    let provider = load_provider(profile, portal_url)?;

    let history_path = resolve_history_path(db_path.map(PathBuf::from))?;
    let mut db = HistoryDb::open(history_path)?;

    println!(
        "Watching attendance for {} every {}s. Press Ctrl-C to stop.",
        provider.username(),
        interval.as_secs()
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let stamp = Local::now().format("%Y-%m-%d %H:%M");
        match watch_cycle(&provider, &mut db).await {
            Ok((overall, biometric)) => {
                println!(
                    "[{}] overall {:.2}%  biometric {:.2}%",
                    stamp, overall, biometric
                );
            }
            Err(SamvidhaError::InvalidCredentials) => return Err(SamvidhaError::InvalidCredentials),
            Err(e) => eprintln!("[{}] scrape failed: {}", stamp, e),
        }
    }
}

/// One watch iteration: fresh login, full scrape, history update.
/// Returns the observed (overall, biometric) percentages.
async fn watch_cycle(provider: &SessionProvider, db: &mut HistoryDb) -> Result<(f64, f64)> {
    let client = provider.session().await?;
    let report = ScrapeEngine::new(client).run().await?;

    let biometric = report
        .biometric
        .as_ref()
        .map(|summary| summary.percentage)
        .unwrap_or(0.0);

    let history = db.load()?;
    let history = record_observation(history, Local::now(), report.overall_average, biometric);
    db.replace_all(&history)?;

    Ok((report.overall_average, biometric))
}
