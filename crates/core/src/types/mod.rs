//! Domain types for Shelfwise
//!
//! This module contains the domain models organized by responsibility:
//! - `book`: catalog book records and cover URLs
//! - `entry`: library entries
//! - `status`: reading status
//! - `rating`: star rating
//! - `stats`: library statistics

mod book;
mod entry;
mod rating;
mod stats;
mod status;

pub use book::{
    cover_url, work_key_from, BookRecord, DEFAULT_COVER_BASE, PLACEHOLDER_COVER_URL,
    UNKNOWN_AUTHOR,
};
pub use entry::LibraryEntry;
pub use rating::Rating;
pub use stats::{LibraryStats, StatusCounts};
pub use status::ReadingStatus;
