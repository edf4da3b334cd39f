//! Catalog search state machine
//!
//! Holds no handle to the network: [`SearchState::begin_search`] and the page
//! moves hand back a [`SearchRequest`] that the caller runs, and the outcome
//! comes back through [`SearchState::finish`] tagged with the request's
//! generation. Outcomes from superseded requests are dropped.

use shelfwise_catalog::{CatalogError, SearchPage};
use shelfwise_core::BookRecord;
use shelfwise_library::LibraryStore;
use std::time::{Duration, Instant};

/// Shown in place of results when a search fails
pub const SEARCH_FAILED: &str = "Something went wrong.";

/// Where the search view is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Results,
    Error,
}

/// A catalog request the caller should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Transient message that disappears on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Search view state
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Text typed into the search box
    pub input: String,
    phase: SearchPhase,
    last_query: Option<String>,
    results: Option<SearchPage>,
    error: Option<String>,
    generation: u64,
    selected: usize,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl SearchState {
    /// Creates an idle search whose notices last `notice_ttl`
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            input: String::new(),
            phase: SearchPhase::Idle,
            last_query: None,
            results: None,
            error: None,
            generation: 0,
            selected: 0,
            notice: None,
            notice_ttl,
        }
    }

    /// Starts a search for `query` at page 1
    ///
    /// Blank queries and searches issued while one is running are ignored.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() || self.is_searching() {
            return None;
        }

        self.last_query = Some(query.to_string());
        self.results = None;
        self.selected = 0;
        Some(self.start(query.to_string(), 1))
    }

    /// Searches for whatever is in the input box
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let query = self.input.clone();
        self.begin_search(&query)
    }

    pub fn next_page(&mut self) -> Option<SearchRequest> {
        let page = self.results.as_ref().filter(|p| p.has_next())?.page + 1;
        self.turn_to(page)
    }

    pub fn previous_page(&mut self) -> Option<SearchRequest> {
        let page = self.results.as_ref().filter(|p| p.has_previous())?.page - 1;
        self.turn_to(page)
    }

    /// Applies the outcome of request `generation`
    ///
    /// Returns false when the outcome belongs to a superseded request.
    pub fn finish(&mut self, generation: u64, outcome: Result<SearchPage, CatalogError>) -> bool {
        if generation != self.generation || !self.is_searching() {
            log::debug!("Dropping stale search result (generation {generation})");
            return false;
        }

        match outcome {
            Ok(page) => {
                self.phase = SearchPhase::Results;
                self.selected = 0;
                self.results = Some(page);
                self.error = None;
            }
            Err(e) => {
                log::warn!("Search failed: {e}");
                self.phase = SearchPhase::Error;
                self.results = None;
                self.error = Some(SEARCH_FAILED.to_string());
            }
        }
        true
    }

    /// Clears the query and results, dropping any request in flight
    pub fn reset(&mut self) {
        let notice = self.notice.take();
        *self = Self {
            generation: self.generation + 1,
            notice,
            ..Self::new(self.notice_ttl)
        };
    }

    /// Adds the highlighted result to `store`
    ///
    /// Returns whether a book was added; a duplicate leaves a warning notice.
    pub fn add_selected(&mut self, store: &LibraryStore, now: Instant) -> bool {
        let Some(book) = self.selected_book().cloned() else {
            return false;
        };

        let title = book.title.clone();
        if store.add(book) {
            self.notify(format!("Added \"{title}\""), NoticeKind::Info, now);
            true
        } else {
            self.notify(
                format!("\"{title}\" is already in your library"),
                NoticeKind::Warning,
                now,
            );
            false
        }
    }

    /// Drops the notice once it has expired
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.books().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Latest page of results, kept visible while the next page loads
    pub fn results(&self) -> Option<&SearchPage> {
        self.results.as_ref()
    }

    pub fn books(&self) -> &[BookRecord] {
        self.results.as_ref().map(|p| p.books.as_slice()).unwrap_or(&[])
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.books().get(self.selected)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn turn_to(&mut self, page: u32) -> Option<SearchRequest> {
        if self.is_searching() {
            return None;
        }
        let query = self.last_query.clone()?;
        Some(self.start(query, page))
    }

    fn start(&mut self, query: String, page: u32) -> SearchRequest {
        self.generation += 1;
        self.phase = SearchPhase::Searching;
        self.error = None;
        log::debug!("Searching for {query:?}, page {page}");
        SearchRequest {
            query,
            page,
            generation: self.generation,
        }
    }

    fn notify(&mut self, message: String, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice {
            message,
            kind,
            expires_at: now + self.notice_ttl,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, total_pages: u32, titles: &[&str]) -> SearchPage {
        SearchPage {
            books: titles
                .iter()
                .enumerate()
                .map(|(i, t)| BookRecord::new(format!("/works/OL{n}{i}W"), *t, "Anon"))
                .collect(),
            total_results: u64::from(total_pages) * 100,
            page: n,
            total_pages,
        }
    }

    #[test]
    fn test_blank_query_stays_idle() {
        let mut search = SearchState::default();
        assert!(search.begin_search("   ").is_none());
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert!(search.last_query().is_none());
    }

    #[test]
    fn test_begin_search_starts_at_page_one() {
        let mut search = SearchState::default();
        let request = search.begin_search(" Dune ").unwrap();

        assert_eq!(request.query, "Dune");
        assert_eq!(request.page, 1);
        assert_eq!(search.phase(), SearchPhase::Searching);
        assert_eq!(search.last_query(), Some("Dune"));
    }

    #[test]
    fn test_search_ignored_while_searching() {
        let mut search = SearchState::default();
        search.begin_search("Dune").unwrap();
        assert!(search.begin_search("Emma").is_none());
        assert_eq!(search.last_query(), Some("Dune"));
    }

    #[test]
    fn test_finish_shows_results() {
        let mut search = SearchState::default();
        let request = search.begin_search("Dune").unwrap();

        assert!(search.finish(request.generation, Ok(page(1, 3, &["Dune", "Dune Messiah"]))));
        assert_eq!(search.phase(), SearchPhase::Results);
        assert_eq!(search.books().len(), 2);
        assert_eq!(search.selected_book().unwrap().title, "Dune");
    }

    #[test]
    fn test_failure_shows_generic_message() {
        let mut search = SearchState::default();
        let request = search.begin_search("Dune").unwrap();

        search.finish(
            request.generation,
            Err(CatalogError::Http {
                status: 503,
                reason: "Service Unavailable".to_string(),
            }),
        );
        assert_eq!(search.phase(), SearchPhase::Error);
        assert_eq!(search.error(), Some(SEARCH_FAILED));
        assert!(search.books().is_empty());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut search = SearchState::default();
        let first = search.begin_search("Dune").unwrap();
        search.reset();
        let second = search.begin_search("Emma").unwrap();

        assert!(!search.finish(first.generation, Ok(page(1, 1, &["Dune"]))));
        assert_eq!(search.phase(), SearchPhase::Searching);

        assert!(search.finish(second.generation, Ok(page(1, 1, &["Emma"]))));
        assert_eq!(search.books()[0].title, "Emma");
    }

    #[test]
    fn test_paging_within_bounds() {
        let mut search = SearchState::default();
        let request = search.begin_search("Dune").unwrap();
        assert!(search.previous_page().is_none());
        search.finish(request.generation, Ok(page(1, 2, &["a"])));

        assert!(search.previous_page().is_none());
        let next = search.next_page().unwrap();
        assert_eq!((next.query.as_str(), next.page), ("Dune", 2));
        // Still showing page 1 while page 2 loads
        assert_eq!(search.results().unwrap().page, 1);
        assert!(search.next_page().is_none());

        search.finish(next.generation, Ok(page(2, 2, &["b"])));
        assert!(search.next_page().is_none());
        assert_eq!(search.previous_page().unwrap().page, 1);
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut search = SearchState::default();
        let request = search.begin_search("Dune").unwrap();
        search.finish(request.generation, Ok(page(1, 1, &["a", "b"])));

        search.select_previous();
        assert_eq!(search.selected(), 0);
        search.select_next();
        search.select_next();
        assert_eq!(search.selected(), 1);
    }

    #[test]
    fn test_notice_expires_on_tick() {
        let mut search = SearchState::new(Duration::from_secs(3));
        let now = Instant::now();
        search.notify("hello".to_string(), NoticeKind::Info, now);

        search.tick(now + Duration::from_secs(2));
        assert!(search.notice().is_some());
        search.tick(now + Duration::from_secs(3));
        assert!(search.notice().is_none());
    }

    #[test]
    fn test_reset_keeps_notice() {
        let mut search = SearchState::default();
        search.input = "Dune".to_string();
        search.notify("Added \"Dune\"".to_string(), NoticeKind::Info, Instant::now());
        search.reset();

        assert!(search.input.is_empty());
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert!(search.notice().is_some());
    }
}
