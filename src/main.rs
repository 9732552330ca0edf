mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wilo::config::WiloConfig;
use wilo::tracker::types::{BackupFrequency, MarkerType};

#[derive(Parser)]
#[command(name = "wilo", version, about = "Remember where you left off")]
struct Cli {
    /// Config file to load instead of ~/.wilo/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a marker from quick-add text, e.g. "Dune page 94 next: reread ch 3"
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[arg(long = "type", value_parser = parse_marker_type, default_value = "other")]
        marker_type: MarkerType,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        pin: bool,
    },
    /// Show how quick-add text would be parsed, without saving
    Parse {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List active markers and today's rhythms
    List {
        /// Show every active marker instead of the configured limit
        #[arg(long)]
        all: bool,
    },
    /// Show one marker in detail
    Show { id: String },
    /// Move a marker's pointer forward (or back with a negative amount)
    Advance {
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        by: Option<i64>,
    },
    /// Change a marker's fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        pointer: Option<String>,
        #[arg(long)]
        next: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long = "type", value_parser = parse_marker_type)]
        marker_type: Option<MarkerType>,
        /// Replace all tags (repeat for several)
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        /// Move to a group; an empty value clears it
        #[arg(long)]
        group: Option<String>,
    },
    /// Pin or unpin a marker
    Pin { id: String },
    /// Archive a marker
    Archive { id: String },
    /// Bring an archived marker back
    Restore { id: String },
    /// Permanently delete a marker (undoable)
    Delete { id: String },
    /// List archived markers and rhythms
    Archived,
    /// Manage recurring reminders
    Rhythm {
        #[command(subcommand)]
        action: RhythmAction,
    },
    /// Search active markers and rhythms
    Search {
        query: String,
        #[arg(long = "type", value_parser = parse_marker_type)]
        marker_type: Option<MarkerType>,
        #[arg(long)]
        pinned: bool,
    },
    /// Revert the most recent change
    Undo,
    /// Write a JSON backup of all data
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load a JSON backup, replacing records with the same id
    Import {
        file: PathBuf,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Show marker and rhythm counts
    Stats,
    /// Show or change app settings
    Settings {
        #[arg(long, value_parser = parse_backup_frequency)]
        backup_reminder: Option<BackupFrequency>,
    },
    /// Delete all markers, rhythms, and undo history
    Reset,
}

#[derive(Subcommand)]
enum RhythmAction {
    /// Create a rhythm
    Add {
        title: String,
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Create with notifications turned off
        #[arg(long)]
        quiet: bool,
    },
    /// Mark a rhythm done and schedule its next occurrence
    Done { id: String },
    /// List active rhythms
    List,
    /// Archive a rhythm
    Archive { id: String },
    /// Bring an archived rhythm back
    Restore { id: String },
    /// Permanently delete a rhythm (undoable)
    Delete { id: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ScheduleArgs {
    #[arg(long)]
    daily: bool,
    /// Comma-separated weekdays, e.g. "mon,wed,fri" or "1,3,5"
    #[arg(long, value_delimiter = ',')]
    weekly: Option<Vec<String>>,
    /// Day of the month (1-31)
    #[arg(long)]
    monthly: Option<u32>,
    /// Every N days
    #[arg(long)]
    every: Option<u32>,
}

fn parse_marker_type(s: &str) -> Result<MarkerType, String> {
    s.to_lowercase().parse()
}

fn parse_backup_frequency(s: &str) -> Result<BackupFrequency, String> {
    s.to_lowercase().parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WiloConfig::load_from(path)?,
        None => WiloConfig::load()?,
    };

    // stderr keeps stdout clean for exported JSON
    let filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add {
            text,
            marker_type,
            tags,
            group,
            pin,
        } => {
            let options = wilo::tracker::markers::MarkerOptions {
                marker_type,
                tags,
                group,
                pinned: pin,
            };
            cli::add::add(&config, &text.join(" "), &options)?;
        }
        Command::Parse { text, json } => cli::add::parse(&text.join(" "), json)?,
        Command::List { all } => cli::list::list(&config, all)?,
        Command::Show { id } => cli::list::show(&config, &id)?,
        Command::Advance { id, by } => cli::marker::advance(&config, &id, by)?,
        Command::Edit {
            id,
            title,
            pointer,
            next,
            note,
            marker_type,
            tags,
            group,
        } => {
            let edit = wilo::tracker::markers::MarkerEdit {
                title,
                pointer,
                next_step: next,
                meeting_note: note,
                marker_type,
                tags,
                group,
            };
            cli::marker::edit(&config, &id, edit)?;
        }
        Command::Pin { id } => cli::marker::pin(&config, &id)?,
        Command::Archive { id } => cli::marker::archive(&config, &id)?,
        Command::Restore { id } => cli::marker::restore(&config, &id)?,
        Command::Delete { id } => cli::marker::delete(&config, &id)?,
        Command::Archived => cli::list::archived(&config)?,
        Command::Rhythm { action } => match action {
            RhythmAction::Add {
                title,
                schedule,
                tags,
                quiet,
            } => {
                let schedule = cli::rhythm::build_schedule(
                    schedule.daily,
                    schedule.weekly.as_deref(),
                    schedule.monthly,
                    schedule.every,
                )?;
                cli::rhythm::add(&config, title, schedule, tags, !quiet)?;
            }
            RhythmAction::Done { id } => cli::rhythm::done(&config, &id)?,
            RhythmAction::List => cli::rhythm::list(&config)?,
            RhythmAction::Archive { id } => cli::rhythm::archive(&config, &id)?,
            RhythmAction::Restore { id } => cli::rhythm::restore(&config, &id)?,
            RhythmAction::Delete { id } => cli::rhythm::delete(&config, &id)?,
        },
        Command::Search {
            query,
            marker_type,
            pinned,
        } => cli::search::search(&config, &query, marker_type, pinned)?,
        Command::Undo => cli::undo::undo(&config)?,
        Command::Export { output } => cli::export::export(&config, output.as_deref())?,
        Command::Import { file, dry_run } => cli::import::import(&config, &file, dry_run)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Settings { backup_reminder } => cli::settings::settings(&config, backup_reminder)?,
        Command::Reset => cli::reset::reset(&config)?,
    }

    Ok(())
}
