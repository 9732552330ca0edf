//! Where I left off: a local tracker for the places you stopped in books,
//! videos, courses, and projects, plus recurring reminders.
//!
//! A **marker** records a title, a pointer (`"page 94"`, `"34:22"`,
//! `"chapter 3 verse 16"`, ...), and an optional next step. A **rhythm** is
//! a recurring reminder whose next occurrence is computed from a schedule.
//!
//! | Pointer | Example | Advances by |
//! |---------|---------|-------------|
//! | Page | `page 94`, `pg 94`, `p. 94` | pages |
//! | Chapter and verse | `chapter 3 verse 16`, `ch 3 v 16` | verses |
//! | Chapter | `chapter 12` | chapters |
//! | Verse | `verse 16` | verses |
//! | Timestamp | `34:22`, `1:02:03` | seconds |
//! | Step | `step 5`, `part 2`, `stage 3` | steps |
//! | Freeform | anything else | never |
//!
//! # Modules
//!
//! - [`pointer`] parses quick-add text and advances pointers
//! - [`schedule`] computes and formats rhythm occurrences
//! - [`config`] loads TOML configuration and environment overrides
//! - [`db`] opens the SQLite store and runs migrations
//! - [`tracker`] stores markers and rhythms with undo, search, and backups

pub mod config;
pub mod db;
pub mod pointer;
pub mod schedule;
pub mod tracker;
