//! CLI `rhythm` subcommands.

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};

use wilo::config::WiloConfig;
use wilo::schedule::{format_relative_to_today, format_schedule, parse_weekday, Schedule};
use wilo::tracker::rhythms::{
    active_rhythms, archive_rhythm, create_rhythm, delete_rhythm, mark_done_now, restore_rhythm,
    NewRhythm,
};

/// Turn the mutually exclusive schedule flags into a [`Schedule`].
pub fn build_schedule(
    daily: bool,
    weekly: Option<&[String]>,
    monthly: Option<u32>,
    every: Option<u32>,
) -> Result<Schedule> {
    let schedule = match (daily, weekly, monthly, every) {
        (true, None, None, None) => Schedule::Daily,
        (false, Some(days), None, None) => {
            let days = days
                .iter()
                .map(|d| parse_weekday(d).with_context(|| format!("not a weekday: {d}")))
                .collect::<Result<Vec<_>>>()?;
            Schedule::weekly(days)?
        }
        (false, None, Some(day), None) => Schedule::monthly(day)?,
        (false, None, None, Some(n)) => Schedule::every(n),
        _ => bail!("choose exactly one of --daily, --weekly, --monthly, --every"),
    };
    Ok(schedule)
}

pub fn add(
    config: &WiloConfig,
    title: String,
    schedule: Schedule,
    tags: Vec<String>,
    notification_enabled: bool,
) -> Result<()> {
    let conn = super::open(config)?;
    let rhythm = create_rhythm(
        &conn,
        NewRhythm {
            title,
            schedule,
            tags,
            notification_enabled,
        },
        &Local::now(),
    )?;
    println!("Added {}", super::rhythm_line(&rhythm, rhythm.id.len()));
    Ok(())
}

pub fn done(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let rhythm = mark_done_now(&mut conn, id, config.undo.max_entries)?;
    println!(
        "Done: {}. Next: {}",
        rhythm.title,
        format_relative_to_today(&rhythm.next_occurrence)
    );
    Ok(())
}

pub fn list(config: &WiloConfig) -> Result<()> {
    let conn = super::open(config)?;
    let rhythms = active_rhythms(&conn)?;
    if rhythms.is_empty() {
        println!("No rhythms yet. Add one with `wilo rhythm add \"Water plants\" --every 3`.");
        return Ok(());
    }

    println!("Rhythms ({})", rhythms.len());
    super::print_rhythms(&rhythms);
    Ok(())
}

pub fn archive(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let rhythm = archive_rhythm(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Archived {} ({})", rhythm.title, format_schedule(&rhythm.schedule));
    Ok(())
}

pub fn restore(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let rhythm = restore_rhythm(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Restored {}", rhythm.title);
    Ok(())
}

pub fn delete(config: &WiloConfig, id: &str) -> Result<()> {
    let mut conn = super::open(config)?;
    let rhythm = delete_rhythm(&mut conn, id, Utc::now(), config.undo.max_entries)?;
    println!("Deleted {} (undo with `wilo undo`)", rhythm.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_flag_accepts_names_and_numbers() {
        let days = vec!["fri".to_string(), "1".to_string(), "Wednesday".to_string()];
        let schedule = build_schedule(false, Some(&days), None, None).unwrap();
        assert_eq!(schedule, Schedule::weekly([1, 3, 5]).unwrap());
    }

    #[test]
    fn rejects_bad_schedule_flags() {
        assert!(build_schedule(false, None, None, None).is_err());
        assert!(build_schedule(true, None, Some(3), None).is_err());
        assert!(build_schedule(false, Some(&["someday".to_string()]), None, None).is_err());
        assert!(build_schedule(false, None, Some(32), None).is_err());
    }
}
