//! CLI commands that change a single marker.

use anyhow::Result;
use chrono::Utc;

use wilo::config::WiloConfig;
use wilo::tracker::markers::{
    advance_marker, archive_marker, delete_marker, edit_marker, find_marker, restore_marker,
    toggle_pin, MarkerEdit,
};

/// Advance by `by`, or by the pointer's smallest quick step when omitted.
pub fn advance(config: &WiloConfig, id: &str, by: Option<i64>) -> Result<()> {
    let mut conn = super::open(config)?;
    let amount = match by {
        Some(amount) => amount,
        None => find_marker(&conn, id)?
            .parsed_pointer()
            .quick_steps()
            .first()
            .copied()
            .unwrap_or(1),
    };

    let marker = advance_marker(&mut conn, id, amount, Utc::now(), config.undo.max_entries)?;
    println!("{} is now at {}", marker.title, marker.pointer);
    Ok(())
}

pub fn edit(config: &WiloConfig, id: &str, edit: MarkerEdit) -> Result<()> {
    let mut conn = super::open(config)?;
    let marker = edit_marker(&mut conn, id, edit, Utc::now(), config.undo.max_entries)?;
    println!("Updated {}", super::marker_line(&marker, marker.id.len()));
    Ok(())
}

pub fn pin(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let marker = toggle_pin(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    let state = if marker.pinned { "Pinned" } else { "Unpinned" };
    println!("{state} {}", marker.title);
    Ok(())
}

pub fn archive(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let marker = archive_marker(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Archived {} (undo with `wilo undo`)", marker.title);
    Ok(())
}

pub fn restore(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let marker = restore_marker(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Restored {}", marker.title);
    Ok(())
}

pub fn delete(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let marker = delete_marker(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Deleted {} (undo with `wilo undo`)", marker.title);
    Ok(())
}
