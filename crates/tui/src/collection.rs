//! Library view model built from store snapshots

use shelfwise_config::CatalogConfig;
use shelfwise_core::{cover_url, LibraryEntry, LibraryStats, Rating, ReadingStatus};
use shelfwise_library::LibrarySnapshot;

pub const EMPTY_LIBRARY: &str = "Your library is empty.";

/// State of a book's summary panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPanel {
    Loading,
    Open,
    Closed,
}

impl SummaryPanel {
    pub fn of(snapshot: &LibrarySnapshot, work_key: &str) -> Self {
        if snapshot.is_loading(work_key) {
            SummaryPanel::Loading
        } else if snapshot.is_open(work_key) {
            SummaryPanel::Open
        } else {
            SummaryPanel::Closed
        }
    }

    /// Label of the summary toggle
    pub fn label(&self) -> &'static str {
        match self {
            SummaryPanel::Loading => "Loading Summary...",
            SummaryPanel::Open => "Hide Summary",
            SummaryPanel::Closed => "Show Summary",
        }
    }
}

/// Which entries the library list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShelfFilter {
    #[default]
    All,
    Reading,
    Finished,
}

impl ShelfFilter {
    pub fn next(&self) -> Self {
        match self {
            ShelfFilter::All => ShelfFilter::Reading,
            ShelfFilter::Reading => ShelfFilter::Finished,
            ShelfFilter::Finished => ShelfFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShelfFilter::All => "All",
            ShelfFilter::Reading => "Not finished",
            ShelfFilter::Finished => "Finished",
        }
    }
}

/// One line of the library list
#[derive(Debug, Clone, PartialEq)]
pub struct BookRow {
    pub key: String,
    pub work_key: String,
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
    pub rating: Rating,
    pub cover_url: String,
    pub panel: SummaryPanel,
    /// Summary text, present only while the panel is open and cached
    pub summary: Option<String>,
}

impl BookRow {
    fn build(entry: &LibraryEntry, snapshot: &LibrarySnapshot, catalog: &CatalogConfig) -> Self {
        let work_key = entry.work_key();
        let panel = SummaryPanel::of(snapshot, work_key);
        let summary = match panel {
            SummaryPanel::Open => snapshot.summary(work_key).map(str::to_string),
            _ => None,
        };

        Self {
            key: entry.key().to_string(),
            work_key: work_key.to_string(),
            title: entry.book.title.clone(),
            author: entry.book.author.clone(),
            status: entry.status,
            rating: entry.rating,
            cover_url: cover_url(
                &catalog.cover_url,
                &catalog.placeholder_cover_url,
                entry.book.cover_id,
            ),
            panel,
            summary,
        }
    }

    pub fn byline(&self) -> String {
        format!("by {}", self.author)
    }

    pub fn stars(&self) -> String {
        self.rating.stars()
    }

    /// The toggle is disabled while a fetch is in flight
    pub fn can_toggle(&self) -> bool {
        self.panel != SummaryPanel::Loading
    }
}

/// Rows of the library view, after filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionView {
    pub rows: Vec<BookRow>,
    pub filter: ShelfFilter,
    /// Size of the whole library, regardless of filter
    pub total: usize,
}

impl CollectionView {
    pub fn build(snapshot: &LibrarySnapshot, catalog: &CatalogConfig, filter: ShelfFilter) -> Self {
        let (finished, reading) = snapshot.partition_finished();
        let entries: Vec<&LibraryEntry> = match filter {
            ShelfFilter::All => snapshot.entries.iter().collect(),
            ShelfFilter::Reading => reading,
            ShelfFilter::Finished => finished,
        };

        Self {
            rows: entries
                .into_iter()
                .map(|e| BookRow::build(e, snapshot, catalog))
                .collect(),
            filter,
            total: snapshot.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&BookRow> {
        self.rows.get(index)
    }

    /// Placeholder line for an empty list
    pub fn empty_message(&self) -> &'static str {
        if self.total == 0 {
            EMPTY_LIBRARY
        } else {
            "No books match this filter."
        }
    }
}

/// Bar chart data: books per star rating, 1 through 5
pub fn rating_bars(stats: &LibraryStats) -> Vec<(String, u64)> {
    (1..=Rating::MAX)
        .map(|stars| (format!("{stars}★"), stats.rated(stars) as u64))
        .collect()
}

/// Bar chart data: books per reading status
pub fn status_bars(stats: &LibraryStats) -> Vec<(String, u64)> {
    ReadingStatus::all()
        .into_iter()
        .map(|s| (s.label().to_string(), stats.by_status.get(s) as u64))
        .collect()
}
