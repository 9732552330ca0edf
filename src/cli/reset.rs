//! CLI `reset` command: delete all data after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use wilo::config::WiloConfig;

/// Delete all markers, rhythms, and undo history. Settings are kept.
pub fn reset(config: &WiloConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("WARNING: This will permanently delete ALL markers, rhythms, and undo history.");
    println!("Database: {}", db_path.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let conn = wilo::db::open_database(&db_path)?;
    wilo::db::clear_all_data(&conn)?;

    println!("All data deleted. Database reset complete.");
    Ok(())
}
