//! Recurrence scheduling for rhythms.
//!
//! A [`Schedule`] says how often something recurs; [`next_occurrence`] finds
//! the next date it is due, and the `format_*` helpers render schedules and
//! dates for display. Everything here is pure: the reference time is always
//! passed in, so callers (and tests) control "now".

mod format;
mod next;
pub mod types;

pub use format::{format_relative_date, format_relative_to_today, format_schedule};
pub use next::{next_occurrence, next_occurrence_from_now, DEFAULT_REMINDER_HOUR};
pub use types::{parse_weekday, Schedule, ScheduleError, WEEKDAY_NAMES};
