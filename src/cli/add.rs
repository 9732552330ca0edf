//! CLI `add` and `parse` commands.

use anyhow::Result;
use chrono::Utc;

use wilo::config::WiloConfig;
use wilo::pointer::parse_marker_input;
use wilo::tracker::markers::{create_from_text, MarkerOptions};

/// Parse quick-add text and save it as a new marker.
pub fn add(config: &WiloConfig, text: &str, options: &MarkerOptions) -> Result<()> {
    let conn = super::open(config)?;
    let marker = create_from_text(&conn, text, options, Utc::now())?;

    println!("Added {}", super::marker_line(&marker, marker.id.len()));
    if marker.pointer.is_empty() {
        println!("No pointer found; set one later with `wilo edit {} --pointer ...`", marker.id);
    }
    Ok(())
}

/// Print what `add` would store for `text`.
pub fn parse(text: &str, json: bool) -> Result<()> {
    let draft = parse_marker_input(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    println!("Title:     {}", draft.title);
    match &draft.parsed {
        Some(pointer) => println!("Pointer:   {} ({})", draft.pointer, pointer.kind()),
        None => println!("Pointer:   (none)"),
    }
    if !draft.next_step.is_empty() {
        println!("Next step: {}", draft.next_step);
    }
    Ok(())
}
