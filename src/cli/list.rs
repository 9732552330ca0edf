//! CLI `list`, `show`, and `archived` commands.

use anyhow::Result;
use chrono::{Local, Utc};

use wilo::config::WiloConfig;
use wilo::schedule::format_relative_to_today;
use wilo::tracker::markers::{active_markers, archived_markers, find_marker};
use wilo::tracker::rhythms::{archived_rhythms, todays_rhythms};
use wilo::tracker::settings::{backup_reminder_due, get_settings};

/// Home view: today's rhythms, then active markers.
pub fn list(config: &WiloConfig, all: bool) -> Result<()> {
    let conn = super::open(config)?;

    let today = todays_rhythms(&conn, &Local::now())?;
    if !today.is_empty() {
        println!("Today");
        super::print_rhythms(&today);
        println!();
    }

    let markers = active_markers(&conn)?;
    if markers.is_empty() {
        println!("No markers yet. Add one with `wilo add \"Book title page 12\"`.");
    } else {
        let shown = if all {
            markers.len()
        } else {
            markers.len().min(config.display.home_marker_limit)
        };
        println!("Markers");
        super::print_markers(&markers[..shown]);
        if shown < markers.len() {
            println!("  ... and {} more (use --all)", markers.len() - shown);
        }
    }

    if backup_reminder_due(&get_settings(&conn)?, Utc::now()) {
        eprintln!("\nIt's been a while since your last backup. Run `wilo export -o backup.json`.");
    }
    Ok(())
}

/// Every field of one marker, plus its quick advance steps.
pub fn show(config: &WiloConfig, id: &str) -> Result<()> {
    let conn = super::open(config)?;
    let marker = find_marker(&conn, id)?;
    let pointer = marker.parsed_pointer();

    println!("{}", marker.title);
    println!("{}", "=".repeat(40));
    println!("  Id:         {}", marker.id);
    println!("  Type:       {}", marker.marker_type);
    if marker.pointer.is_empty() {
        println!("  Pointer:    (none)");
    } else {
        println!("  Pointer:    {} ({})", marker.pointer, pointer.kind());
    }
    if !marker.next_step.is_empty() {
        println!("  Next step:  {}", marker.next_step);
    }
    if let Some(note) = &marker.meeting_note {
        println!("  Note:       {note}");
    }
    if !marker.tags.is_empty() {
        println!("  Tags:       {}", marker.tags.join(", "));
    }
    if let Some(group) = &marker.group {
        println!("  Group:      {group}");
    }
    println!("  Pinned:     {}", if marker.pinned { "yes" } else { "no" });
    println!("  Archived:   {}", if marker.archived { "yes" } else { "no" });
    println!("  Created:    {}", format_relative_to_today(&marker.created_at));
    println!("  Touched:    {}", format_relative_to_today(&marker.last_touched));

    let steps = pointer.quick_steps();
    if !steps.is_empty() {
        let steps: Vec<String> = steps.iter().map(|s| format!("--by {s}")).collect();
        println!("  Advance:    {}", steps.join(" | "));
    }
    Ok(())
}

pub fn archived(config: &WiloConfig) -> Result<()> {
    let conn = super::open(config)?;
    let markers = archived_markers(&conn)?;
    let rhythms = archived_rhythms(&conn)?;

    if markers.is_empty() && rhythms.is_empty() {
        println!("Nothing archived.");
        return Ok(());
    }
    if !markers.is_empty() {
        println!("Archived markers");
        super::print_markers(&markers);
    }
    if !rhythms.is_empty() {
        println!("Archived rhythms");
        super::print_rhythms(&rhythms);
    }
    Ok(())
}
