//! Domain types shared by every Shelfwise crate
//!
//! - `types::book`: catalog book records and cover URL derivation
//! - `types::entry`: library entries (a book plus reading status and rating)
//! - `types::status` / `types::rating`: the two user annotations
//! - `types::stats`: aggregate counts for the statistics view

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{
    cover_url, work_key_from, BookRecord, LibraryEntry, LibraryStats, Rating, ReadingStatus,
    StatusCounts, DEFAULT_COVER_BASE, PLACEHOLDER_COVER_URL, UNKNOWN_AUTHOR,
};
