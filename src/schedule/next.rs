//! Next-occurrence computation.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone};

use super::types::{normalize_weekdays, Schedule, ScheduleError};

/// Hour of day (local) that every occurrence is placed at.
pub const DEFAULT_REMINDER_HOUR: u32 = 9;

/// Compute the next occurrence of `schedule` after `from`.
///
/// The result always falls on a later calendar day than `from` (completing a
/// rhythm today never schedules it again for today) and is pinned to
/// [`DEFAULT_REMINDER_HOUR`]:00 in `from`'s time zone.
///
/// Weekly schedules without days and monthly schedules without a day of the
/// month are configuration errors and are returned as such.
pub fn next_occurrence<Tz: TimeZone>(
    schedule: &Schedule,
    from: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ScheduleError> {
    schedule.validate()?;
    let today = from.date_naive();

    let date = match schedule {
        Schedule::Daily => add_days(today, 1)?,
        Schedule::Custom { interval_days } => add_days(today, Schedule::interval(*interval_days))?,
        Schedule::Weekly { days_of_week } => next_weekly(today, days_of_week)?,
        Schedule::Monthly { day_of_month } => next_monthly(today, *day_of_month)?,
        Schedule::Unknown => return Err(ScheduleError::UnknownSchedule),
    };

    at_reminder_hour(&from.timezone(), date)
}

/// [`next_occurrence`] relative to the current local time.
pub fn next_occurrence_from_now(schedule: &Schedule) -> Result<DateTime<Local>, ScheduleError> {
    next_occurrence(schedule, &Local::now())
}

fn next_weekly(today: NaiveDate, days_of_week: &[u8]) -> Result<NaiveDate, ScheduleError> {
    let days = normalize_weekdays(days_of_week.iter().copied());
    let first = *days.first().ok_or(ScheduleError::MissingWeekdays)?;
    let current = today.weekday().num_days_from_sunday() as u8;

    let offset = match days.iter().find(|day| **day > current) {
        Some(day) => day - current,
        None => 7 - current + first,
    };
    add_days(today, u32::from(offset))
}

fn next_monthly(today: NaiveDate, day_of_month: Option<u32>) -> Result<NaiveDate, ScheduleError> {
    let target = day_of_month.ok_or(ScheduleError::MissingDayOfMonth)?;

    let this_month = target.min(days_in_month(today.year(), today.month()));
    if this_month > today.day() {
        return today.with_day(this_month).ok_or(ScheduleError::OutOfRange);
    }

    let (year, month) = following_month(today.year(), today.month());
    let day = target.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ScheduleError::OutOfRange)
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = following_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, ScheduleError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or(ScheduleError::OutOfRange)
}

fn at_reminder_hour<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Tz>, ScheduleError> {
    let naive = date
        .and_hms_opt(DEFAULT_REMINDER_HOUR, 0, 0)
        .ok_or(ScheduleError::OutOfRange)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or(ScheduleError::NonexistentLocalTime(naive))
}
