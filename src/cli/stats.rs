use anyhow::Result;
use chrono::Local;

use wilo::config::WiloConfig;
use wilo::tracker::stats::tracker_stats;

/// Display marker and rhythm counts in the terminal.
pub fn stats(config: &WiloConfig) -> Result<()> {
    let conn = super::open(config)?;
    let stats = tracker_stats(&conn, &Local::now())?;

    println!("Statistics");
    println!("{}", "=".repeat(40));
    println!("  Active markers:      {}", stats.active_markers);
    println!("  Pinned:              {}", stats.pinned_markers);
    println!("  Archived markers:    {}", stats.archived_markers);
    println!();

    println!("By Type:");
    for (marker_type, count) in &stats.markers_by_type {
        println!("  {:<12} {}", marker_type, count);
    }
    println!();

    println!("  Active rhythms:      {}", stats.active_rhythms);
    println!("  Due today:           {}", stats.rhythms_due_today);
    println!("  Archived rhythms:    {}", stats.archived_rhythms);
    println!("Database:              {}", config.resolved_db_path().display());

    Ok(())
}
