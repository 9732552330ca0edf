//! Schedule definitions and their configuration errors.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full weekday names indexed 0 = Sunday .. 6 = Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// How often a rhythm recurs.
///
/// Serialized as an internally tagged object, e.g.
/// `{"type": "weekly", "days_of_week": [1, 3]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    Daily,
    Weekly {
        /// Weekday indices, 0 = Sunday .. 6 = Saturday.
        #[serde(default)]
        days_of_week: Vec<u8>,
    },
    Monthly {
        /// 1..=31. Clamped to the month's length when computing occurrences.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day_of_month: Option<u32>,
    },
    Custom {
        /// Zero or missing is treated as 1.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval_days: Option<u32>,
    },
    /// A schedule type this version doesn't know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("weekly schedule must have at least one day of the week")]
    MissingWeekdays,

    #[error("weekday index {0} is out of range (0 = Sunday .. 6 = Saturday)")]
    InvalidWeekday(u8),

    #[error("monthly schedule must have a day of month")]
    MissingDayOfMonth,

    #[error("day of month {0} is out of range (1-31)")]
    InvalidDayOfMonth(u32),

    #[error("unknown schedule type")]
    UnknownSchedule,

    #[error("next occurrence is out of the supported date range")]
    OutOfRange,

    #[error("{0} does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

impl Schedule {
    /// Weekly schedule on the given days. Days are sorted and de-duplicated.
    pub fn weekly(days: impl IntoIterator<Item = u8>) -> Result<Self, ScheduleError> {
        let schedule = Self::Weekly {
            days_of_week: normalize_weekdays(days),
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn monthly(day_of_month: u32) -> Result<Self, ScheduleError> {
        let schedule = Self::Monthly {
            day_of_month: Some(day_of_month),
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Every `interval_days` days (0 is treated as 1).
    pub fn every(interval_days: u32) -> Self {
        Self::Custom {
            interval_days: Some(interval_days.max(1)),
        }
    }

    /// Check that the schedule can produce occurrences.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        match self {
            Self::Daily | Self::Custom { .. } => Ok(()),
            Self::Weekly { days_of_week } => {
                if days_of_week.is_empty() {
                    return Err(ScheduleError::MissingWeekdays);
                }
                match days_of_week.iter().find(|d| **d > 6) {
                    Some(bad) => Err(ScheduleError::InvalidWeekday(*bad)),
                    None => Ok(()),
                }
            }
            Self::Monthly { day_of_month } => match day_of_month {
                None => Err(ScheduleError::MissingDayOfMonth),
                Some(day) if !(1..=31).contains(day) => Err(ScheduleError::InvalidDayOfMonth(*day)),
                Some(_) => Ok(()),
            },
            Self::Unknown => Err(ScheduleError::UnknownSchedule),
        }
    }

    /// Effective interval for a custom schedule.
    pub(crate) fn interval(interval_days: Option<u32>) -> u32 {
        interval_days.unwrap_or(1).max(1)
    }
}

/// Sorted, de-duplicated weekday indices.
pub(crate) fn normalize_weekdays(days: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut days: Vec<u8> = days.into_iter().collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Parse a weekday given as an index (`"0"`..`"6"`) or an English name or
/// prefix of at least three letters (`"mon"`, `"Thursday"`).
pub fn parse_weekday(input: &str) -> Option<u8> {
    let input = input.trim().to_lowercase();
    if let Ok(index) = input.parse::<u8>() {
        return (index <= 6).then_some(index);
    }
    if input.len() < 3 {
        return None;
    }
    WEEKDAY_NAMES
        .iter()
        .position(|name| name.to_lowercase().starts_with(&input))
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_sorts_and_dedups() {
        let schedule = Schedule::weekly([5, 1, 5, 3]).unwrap();
        assert_eq!(
            schedule,
            Schedule::Weekly {
                days_of_week: vec![1, 3, 5]
            }
        );
    }

    #[test]
    fn weekly_rejects_empty_and_out_of_range() {
        assert_eq!(Schedule::weekly(Vec::<u8>::new()), Err(ScheduleError::MissingWeekdays));
        assert_eq!(Schedule::weekly([2, 7]), Err(ScheduleError::InvalidWeekday(7)));
    }

    #[test]
    fn monthly_rejects_out_of_range_day() {
        assert_eq!(Schedule::monthly(0), Err(ScheduleError::InvalidDayOfMonth(0)));
        assert_eq!(Schedule::monthly(32), Err(ScheduleError::InvalidDayOfMonth(32)));
        assert!(Schedule::monthly(31).is_ok());
    }

    #[test]
    fn every_zero_means_every_day() {
        assert_eq!(
            Schedule::every(0),
            Schedule::Custom {
                interval_days: Some(1)
            }
        );
    }

    #[test]
    fn deserializes_archive_shape() {
        let s: Schedule = serde_json::from_str(r#"{"type":"weekly","days_of_week":[1,3]}"#).unwrap();
        assert_eq!(s, Schedule::Weekly { days_of_week: vec![1, 3] });

        let s: Schedule = serde_json::from_str(r#"{"type":"monthly"}"#).unwrap();
        assert_eq!(s.validate(), Err(ScheduleError::MissingDayOfMonth));

        let s: Schedule = serde_json::from_str(r#"{"type":"yearly"}"#).unwrap();
        assert_eq!(s, Schedule::Unknown);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&Schedule::Daily).unwrap();
        assert_eq!(json, r#"{"type":"daily"}"#);
    }

    #[test]
    fn parses_weekday_names_and_indices() {
        assert_eq!(parse_weekday("0"), Some(0));
        assert_eq!(parse_weekday("Sun"), Some(0));
        assert_eq!(parse_weekday("thursday"), Some(4));
        assert_eq!(parse_weekday("sat"), Some(6));
        assert_eq!(parse_weekday("7"), None);
        assert_eq!(parse_weekday("tu"), None);
        assert_eq!(parse_weekday("someday"), None);
    }
}
