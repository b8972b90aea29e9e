//! History commands for samvidha-cli

use std::path::PathBuf;

use crate::error::Result;
use crate::history::store::resolve_history_path;
use crate::history::HistoryDb;

/// Show the recorded per-day history
pub async fn show(json: bool, db_path: Option<String>) -> Result<()> {
    let path = resolve_history_path(db_path.map(PathBuf::from))?;
    let db = HistoryDb::open(path)?;
    let entries = db.load()?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        println!("Run 'samvidha report' or 'samvidha watch' to record a data point.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<12} {:>9} {:>11}", "Date", "Overall", "Biometric");
    println!("{}", "-".repeat(34));

    for entry in &entries {
        println!(
            "{:<12} {:>8.2}% {:>10.2}%",
            entry.date, entry.overall, entry.biometric
        );
    }

    println!("\nShowing {} days", entries.len());

    Ok(())
}

/// Clear the recorded history
pub async fn clear(db_path: Option<String>) -> Result<()> {
    let path = resolve_history_path(db_path.map(PathBuf::from))?;
    let mut db = HistoryDb::open(path)?;
    db.clear()?;

    println!("History cleared.");
    Ok(())
}
