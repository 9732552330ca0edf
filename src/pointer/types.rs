//! Pointer value types.
//!
//! A [`Pointer`] is the structured form of a location string such as
//! `"page 47"` or `"1:02:30"`. Its [`Display`](std::fmt::Display) output is
//! the canonical text that [`super::parse_pointer`] reads back unchanged.

use serde::Serialize;
use std::fmt;

/// Elapsed time within a video, podcast, or lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// `None` for the short `M:SS` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    pub minutes: u32,
    pub seconds: u32,
}

impl Timestamp {
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.hours.unwrap_or(0)) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds)
    }

    /// Build a timestamp from a second count. Negative counts saturate at zero,
    /// and the hour component is only present when it is non-zero.
    pub fn from_total_seconds(total: i64) -> Self {
        let total = total.clamp(0, i64::from(u32::MAX));
        let hours = (total / 3600) as u32;
        let minutes = ((total % 3600) / 60) as u32;
        let seconds = (total % 60) as u32;
        Self {
            hours: (hours > 0).then_some(hours),
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours {
            Some(h) => write!(f, "{h}:{:02}:{:02}", self.minutes, self.seconds),
            None => write!(f, "{}:{:02}", self.minutes, self.seconds),
        }
    }
}

/// Structured location within a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pointer {
    Page { page: u32 },
    ChapterVerse { chapter: u32, verse: u32 },
    Chapter { chapter: u32 },
    Verse { verse: u32 },
    Timestamp(Timestamp),
    Step { step: u32 },
    /// Anything without a recognized structure. Cannot be advanced.
    Freeform { raw: String },
}

impl Pointer {
    /// Short label for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Page { .. } => "page",
            Self::ChapterVerse { .. } => "chapter_verse",
            Self::Chapter { .. } => "chapter",
            Self::Verse { .. } => "verse",
            Self::Timestamp(_) => "timestamp",
            Self::Step { .. } => "step",
            Self::Freeform { .. } => "freeform",
        }
    }

    pub fn is_advanceable(&self) -> bool {
        !matches!(self, Self::Freeform { .. })
    }

    /// Deltas offered as one-tap advances for this kind of pointer.
    /// Timestamp deltas are in seconds.
    pub fn quick_steps(&self) -> &'static [i64] {
        match self {
            Self::Page { .. } | Self::Verse { .. } | Self::ChapterVerse { .. } => &[1, 5],
            Self::Chapter { .. } | Self::Step { .. } => &[1],
            Self::Timestamp(_) => &[30, 60, 300],
            Self::Freeform { .. } => &[],
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page { page } => write!(f, "page {page}"),
            Self::ChapterVerse { chapter, verse } => write!(f, "chapter {chapter} verse {verse}"),
            Self::Chapter { chapter } => write!(f, "chapter {chapter}"),
            Self::Verse { verse } => write!(f, "verse {verse}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Step { step } => write!(f, "step {step}"),
            Self::Freeform { raw } => f.write_str(raw),
        }
    }
}

/// Result of parsing free text typed into the quick-add box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerDraft {
    pub title: String,
    /// Canonical pointer text, or empty when none was found.
    pub pointer: String,
    /// Empty when the text had no `next:`/`then:`/`todo:`/`reminder:` clause.
    pub next_step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<Pointer>,
}
