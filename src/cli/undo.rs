use anyhow::Result;

use wilo::config::WiloConfig;
use wilo::tracker::undo::undo_latest;

/// Revert the most recent change.
pub fn undo(config: &WiloConfig) -> Result<()> {
    let mut conn = super::open(config)?;
    match undo_latest(&mut conn)? {
        Some(entry) => println!(
            "Undid \"{}\" on {}",
            entry.description,
            entry.snapshot.title()
        ),
        None => println!("Nothing to undo."),
    }
    Ok(())
}
