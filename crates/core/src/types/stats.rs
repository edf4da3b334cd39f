//! Library statistics

use crate::types::{LibraryEntry, Rating, ReadingStatus};
use serde::{Deserialize, Serialize};

/// Number of entries in each reading status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub owned: usize,
    pub started: usize,
    pub finished: usize,
}

impl StatusCounts {
    /// Returns the count for one status
    pub fn get(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::Owned => self.owned,
            ReadingStatus::Started => self.started,
            ReadingStatus::Finished => self.finished,
        }
    }

    fn bump(&mut self, status: ReadingStatus) {
        match status {
            ReadingStatus::Owned => self.owned += 1,
            ReadingStatus::Started => self.started += 1,
            ReadingStatus::Finished => self.finished += 1,
        }
    }
}

/// Library-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub finished_count: usize,
    pub unfinished_count: usize,
    pub by_status: StatusCounts,
    /// Books per star rating; index 0 holds 1-star books
    pub rating_buckets: [usize; Rating::MAX as usize],
    pub unrated_count: usize,
    pub authors_count: usize,
}

impl LibraryStats {
    /// Creates empty statistics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aggregates statistics over a set of entries
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LibraryEntry>,
    {
        let mut stats = Self::empty();
        let mut authors = std::collections::HashSet::new();

        for entry in entries {
            stats.total_books += 1;
            stats.by_status.bump(entry.status);

            if entry.is_finished() {
                stats.finished_count += 1;
            } else {
                stats.unfinished_count += 1;
            }

            match entry.rating.value() {
                0 => stats.unrated_count += 1,
                stars => stats.rating_buckets[usize::from(stars) - 1] += 1,
            }

            authors.insert(entry.book.author.as_str());
        }

        stats.authors_count = authors.len();
        stats
    }

    /// Returns the number of books rated `stars` (1–5)
    pub fn rated(&self, stars: u8) -> usize {
        match stars {
            1..=Rating::MAX => self.rating_buckets[usize::from(stars) - 1],
            _ => 0,
        }
    }

    /// Returns the number of rated books
    pub fn rated_count(&self) -> usize {
        self.rating_buckets.iter().sum()
    }

    /// Returns the average rating over rated books
    pub fn average_rating(&self) -> Option<f64> {
        let rated = self.rated_count();
        if rated == 0 {
            return None;
        }
        let total: usize = self
            .rating_buckets
            .iter()
            .enumerate()
            .map(|(i, count)| (i + 1) * count)
            .sum();
        Some(total as f64 / rated as f64)
    }

    /// Returns the percentage of finished books
    pub fn finished_percentage(&self) -> f64 {
        if self.total_books == 0 {
            return 0.0;
        }
        (self.finished_count as f64 / self.total_books as f64) * 100.0
    }

    /// Splits entries into finished and not-finished, keeping their order
    pub fn partition_finished<'a, I>(entries: I) -> (Vec<&'a LibraryEntry>, Vec<&'a LibraryEntry>)
    where
        I: IntoIterator<Item = &'a LibraryEntry>,
    {
        entries.into_iter().partition(|e| e.is_finished())
    }
}
