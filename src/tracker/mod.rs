//! Application layer: markers, rhythms, undo, search, settings, and backups,
//! all stored through a borrowed [`rusqlite::Connection`].

pub mod markers;
pub mod rhythms;
pub mod search;
pub mod settings;
pub mod stats;
pub mod transfer;
pub mod types;
pub mod undo;

/// Conversion error for a text column whose stored value does not decode.
pub(crate) fn bad_column(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, err.into())
}
