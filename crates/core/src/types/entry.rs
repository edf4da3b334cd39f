//! Library entries

use crate::types::{BookRecord, Rating, ReadingStatus};
use serde::{Deserialize, Serialize};

/// A book in the user's library, with their status and rating
///
/// Serialized flat: the book fields sit next to `status` and `rating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(flatten)]
    pub book: BookRecord,
    #[serde(default, deserialize_with = "ReadingStatus::deserialize_lenient")]
    pub status: ReadingStatus,
    #[serde(default)]
    pub rating: Rating,
}

impl LibraryEntry {
    /// Creates an entry with status owned and no rating
    pub fn from_book(book: BookRecord) -> Self {
        Self {
            book,
            status: ReadingStatus::default(),
            rating: Rating::UNRATED,
        }
    }

    /// Catalog key
    pub fn key(&self) -> &str {
        &self.book.key
    }

    /// Work key used for summaries
    pub fn work_key(&self) -> &str {
        &self.book.work_key
    }

    /// Returns true if the status is finished
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}

impl From<BookRecord> for LibraryEntry {
    fn from(book: BookRecord) -> Self {
        Self::from_book(book)
    }
}
