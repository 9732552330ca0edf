//! Human-readable rendering of schedules and dates.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use super::types::{Schedule, WEEKDAY_NAMES};

/// Describe a schedule, e.g. `"Every Monday, Thursday"` or `"Every 3 days"`.
///
/// Weekly days are listed in the order they were stored.
pub fn format_schedule(schedule: &Schedule) -> String {
    match schedule {
        Schedule::Daily => "Every day".to_string(),
        Schedule::Weekly { days_of_week } => {
            let names: Vec<&str> = days_of_week
                .iter()
                .filter_map(|day| WEEKDAY_NAMES.get(usize::from(*day)).copied())
                .collect();
            if names.is_empty() {
                "Weekly".to_string()
            } else {
                format!("Every {}", names.join(", "))
            }
        }
        Schedule::Monthly { day_of_month } => match day_of_month {
            Some(day) => format!("Monthly on day {day}"),
            None => "Monthly".to_string(),
        },
        Schedule::Custom { interval_days } => match Schedule::interval(*interval_days) {
            1 => "Every day".to_string(),
            n => format!("Every {n} days"),
        },
        Schedule::Unknown => "Unknown schedule".to_string(),
    }
}

/// Describe `target` relative to `today` using calendar days only.
///
/// Dates a week or more ahead are shown as `"Mar 5"`; the year is never shown.
pub fn format_relative_date(target: NaiveDate, today: NaiveDate) -> String {
    let diff = (target - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d if d < 7 => format!("In {d} days"),
        _ => target.format("%b %-d").to_string(),
    }
}

/// [`format_relative_date`] against the current local date.
pub fn format_relative_to_today<Tz: TimeZone>(when: &DateTime<Tz>) -> String {
    let local = when.with_timezone(&Local);
    format_relative_date(local.date_naive(), Local::now().date_naive())
}
