use anyhow::Result;
use chrono::Utc;

use wilo::config::WiloConfig;
use wilo::schedule::format_relative_to_today;
use wilo::tracker::settings::{backup_reminder_due, get_settings, save_settings};
use wilo::tracker::types::BackupFrequency;

/// Print settings, after applying any change given on the command line.
pub fn settings(config: &WiloConfig, backup_reminder: Option<BackupFrequency>) -> Result<()> {
    let conn = super::open(config)?;
    let mut settings = get_settings(&conn)?;

    if let Some(frequency) = backup_reminder {
        settings.backup_reminder_frequency = frequency;
        save_settings(&conn, &settings)?;
        println!("Backup reminder set to {frequency}.");
    }

    println!("Backup reminder:  {}", settings.backup_reminder_frequency);
    match settings.last_backup_reminder {
        Some(last) => println!("Last backup:      {}", format_relative_to_today(&last)),
        None => println!("Last backup:      never"),
    }
    if backup_reminder_due(&settings, Utc::now()) {
        println!("A backup is due. Run `wilo export -o backup.json`.");
    }
    println!("Undo history:     {} entries", config.undo.max_entries);
    Ok(())
}
