use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use wilo::config::WiloConfig;
use wilo::tracker::transfer::export_data;

/// Export all markers, rhythms, and settings as JSON to a file or stdout.
pub fn export(config: &WiloConfig, output: Option<&Path>) -> Result<()> {
    let conn = super::open(config)?;
    let data = export_data(&conn, Utc::now())?;
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write export file: {}", path.display()))?,
        None => println!("{json}"),
    }

    // stderr so piping stdout to a file yields clean JSON
    eprintln!(
        "Exported {} markers and {} rhythms.",
        data.markers.len(),
        data.rhythms.len()
    );
    Ok(())
}
