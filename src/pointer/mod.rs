//! Pointer parsing: turning "where I left off" text into structured locations.
//!
//! - [`parse_marker_input`] splits quick-add text into title, pointer, and next step.
//! - [`parse_pointer`] reads a stored pointer string back into a [`Pointer`].
//! - [`advance_pointer`] moves a pointer forward by a delta.
//!
//! All functions are pure and never fail; unrecognized text simply yields a
//! [`Pointer::Freeform`] value.

mod advance;
mod parse;
mod rules;
pub mod types;

pub use advance::advance_pointer;
pub use parse::{parse_marker_input, parse_pointer};
pub use types::{MarkerDraft, Pointer, Timestamp};
