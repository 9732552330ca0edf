//! Record types for markers, rhythms, undo history, and settings.
//!
//! Field names and JSON shapes match the export archive, so these types are
//! serialized directly by [`super::transfer`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pointer::{parse_pointer, Pointer};
use crate::schedule::Schedule;

/// What kind of thing a marker tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    Book,
    Bible,
    Article,
    Video,
    Project,
    Course,
    #[default]
    Other,
}

impl MarkerType {
    pub const ALL: [MarkerType; 7] = [
        Self::Book,
        Self::Bible,
        Self::Article,
        Self::Video,
        Self::Project,
        Self::Course,
        Self::Other,
    ];

    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Bible => "bible",
            Self::Article => "article",
            Self::Video => "video",
            Self::Project => "project",
            Self::Course => "course",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for MarkerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MarkerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown marker type: {s}"))
    }
}

/// Where the user left off in something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    pub title: String,
    /// Location text such as `"page 94"`; may be empty.
    #[serde(default)]
    pub pointer: String,
    #[serde(default)]
    pub next_step: String,
    #[serde(rename = "type", default)]
    pub marker_type: MarkerType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_note: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    /// Bumped whenever the marker is edited or advanced.
    pub last_touched: DateTime<Utc>,
}

impl Marker {
    /// A fresh, unpinned, active marker with a new id.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            title: title.into(),
            pointer: String::new(),
            next_step: String::new(),
            marker_type: MarkerType::Other,
            tags: Vec::new(),
            group: None,
            meeting_note: None,
            pinned: false,
            archived: false,
            created_at: now,
            last_touched: now,
        }
    }

    pub fn parsed_pointer(&self) -> Pointer {
        parse_pointer(&self.pointer)
    }
}

/// A recurring reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rhythm {
    pub id: String,
    pub title: String,
    pub schedule: Schedule,
    pub next_occurrence: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub notification_enabled: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Kind of reversible action recorded on the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoKind {
    Archive,
    Restore,
    Advance,
    MarkDone,
    Delete,
    Edit,
    Pin,
}

impl UndoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::Advance => "advance",
            Self::MarkDone => "mark_done",
            Self::Delete => "delete",
            Self::Edit => "edit",
            Self::Pin => "pin",
        }
    }
}

impl std::str::FromStr for UndoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive" => Ok(Self::Archive),
            "restore" => Ok(Self::Restore),
            "advance" => Ok(Self::Advance),
            "mark_done" => Ok(Self::MarkDone),
            "delete" => Ok(Self::Delete),
            "edit" => Ok(Self::Edit),
            "pin" => Ok(Self::Pin),
            _ => Err(format!("unknown undo action: {s}")),
        }
    }
}

/// A record exactly as it was before an action touched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", content = "record", rename_all = "snake_case")]
pub enum Snapshot {
    Marker(Marker),
    Rhythm(Rhythm),
}

impl Snapshot {
    pub fn id(&self) -> &str {
        match self {
            Self::Marker(m) => &m.id,
            Self::Rhythm(r) => &r.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Marker(m) => &m.title,
            Self::Rhythm(r) => &r.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoAction {
    pub id: String,
    pub action: UndoKind,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Snapshot,
    /// Short text shown to the user, e.g. `"Advanced to page 99"`.
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupFrequency {
    Never,
    Weekly,
    #[default]
    Monthly,
}

impl BackupFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackupFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("unknown backup frequency: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub backup_reminder_frequency: BackupFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup_reminder: Option<DateTime<Utc>>,
}
