use anyhow::{Context, Result};
use std::path::Path;

use wilo::config::WiloConfig;
use wilo::tracker::transfer::{import_data, preview_import};

/// Import a JSON backup. Records with an existing id are overwritten.
pub fn import(config: &WiloConfig, file: &Path, dry_run: bool) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;

    let mut conn = super::open(config)?;
    let preview = preview_import(&conn, &json)?;

    println!("{} import:", if dry_run { "Planned" } else { "Running" });
    println!("  New markers:      {}", preview.new_markers);
    println!("  Updated markers:  {}", preview.updated_markers);
    println!("  New rhythms:      {}", preview.new_rhythms);
    println!("  Updated rhythms:  {}", preview.updated_rhythms);
    if !preview.conflicts.is_empty() {
        println!("  Conflicts (local copy is newer and will be overwritten):");
        for conflict in &preview.conflicts {
            tracing::warn!(id = %conflict.id, reason = %conflict.reason, "import conflict");
            println!("    {} ({:?}): {}", conflict.title, conflict.kind, conflict.reason);
        }
    }

    if dry_run {
        println!("Dry run: nothing was written.");
        return Ok(());
    }

    let summary = import_data(&mut conn, &json)?;
    println!(
        "Import complete: {} markers, {} rhythms.",
        summary.markers, summary.rhythms
    );
    Ok(())
}
