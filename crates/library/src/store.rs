//! The library store
//!
//! Holds the collection, the summary cache and the per-work loading and
//! panel flags behind one mutex. Every mutation is persisted before the lock
//! is released and announced on a broadcast channel afterwards.

use crate::events::{self, LibraryEvent};
use crate::snapshot::LibrarySnapshot;
use shelfwise_catalog::Catalog;
use shelfwise_core::{BookRecord, LibraryEntry, LibraryStats, Rating, ReadingStatus};
use shelfwise_storage::{keys, PersistentStore};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

/// Shared handle to the personal library
///
/// Cloning is cheap and every clone sees the same state.
#[derive(Clone)]
pub struct LibraryStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<LibraryState>,
    persistence: PersistentStore,
    catalog: Arc<dyn Catalog>,
    events: broadcast::Sender<LibraryEvent>,
    runtime: Option<Handle>,
}

#[derive(Default)]
struct LibraryState {
    entries: Vec<LibraryEntry>,
    summaries: BTreeMap<String, String>,
    open: BTreeMap<String, bool>,
    /// Work key to the ticket of the fetch in flight
    loading: HashMap<String, u64>,
    next_ticket: u64,
}

impl LibraryState {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == key)
    }

    fn owns_work_key(&self, work_key: &str) -> bool {
        self.entries.iter().any(|e| e.work_key() == work_key)
    }

    /// Marks `work_key` as loading if it has no summary and no fetch in flight
    fn claim_fetch(&mut self, work_key: &str) -> Option<u64> {
        if self.summaries.contains_key(work_key) || self.loading.contains_key(work_key) {
            return None;
        }
        self.next_ticket += 1;
        self.loading.insert(work_key.to_string(), self.next_ticket);
        Some(self.next_ticket)
    }
}

/// A fetch claimed under the lock, to be spawned once it is released
struct PendingFetch {
    work_key: String,
    ticket: u64,
}

#[derive(Clone, Copy)]
enum Section {
    Library,
    Summaries,
    Open,
}

impl LibraryStore {
    /// Loads the persisted library and wires it to `catalog`
    ///
    /// Summary fetches are spawned on the Tokio runtime current at
    /// construction; without one they are skipped.
    pub fn new(persistence: PersistentStore, catalog: Arc<dyn Catalog>) -> Self {
        let entries: Vec<LibraryEntry> = persistence.load_json(keys::LIBRARY);
        let summaries: BTreeMap<String, String> = persistence.load_json(keys::SUMMARIES);
        let open: BTreeMap<String, bool> = persistence.load_json(keys::OPEN_SUMMARIES);

        log::info!(
            "Loaded library with {} books and {} cached summaries",
            entries.len(),
            summaries.len()
        );

        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            log::warn!("No async runtime available; summaries will not be fetched");
        }

        let mut state = LibraryState {
            entries,
            summaries,
            open,
            ..LibraryState::default()
        };
        dedupe(&mut state.entries);

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                persistence,
                catalog,
                events: events::channel(),
                runtime,
            }),
        }
    }

    /// Receives every change applied from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.inner.events.subscribe()
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.inner.catalog
    }

    /// Adds a book as owned and unrated
    ///
    /// Returns `false` without changing anything if an entry with the same
    /// key exists. Otherwise starts a summary fetch for its work if needed.
    pub fn add(&self, book: BookRecord) -> bool {
        let key = book.key.clone();
        let pending = {
            let mut state = self.lock();
            if state.position(&key).is_some() {
                log::debug!("{} is already in the library", key);
                return false;
            }

            let work_key = book.work_key.clone();
            state.entries.push(LibraryEntry::from_book(book));
            self.persist(&state, Section::Library);
            log::info!("Added {} to the library", key);

            self.emit(LibraryEvent::Added { key });
            self.claim_fetch(&mut state, &work_key)
        };

        self.spawn_fetch(pending);
        true
    }

    /// Removes the entry with `key`
    ///
    /// The summary, loading flag and panel state of its work are dropped too,
    /// unless another entry shares the work.
    pub fn remove(&self, key: &str) -> bool {
        let mut state = self.lock();
        let Some(index) = state.position(key) else {
            return false;
        };

        let entry = state.entries.remove(index);
        self.persist(&state, Section::Library);

        let work_key = entry.work_key();
        if !state.owns_work_key(work_key) {
            state.loading.remove(work_key);
            if state.summaries.remove(work_key).is_some() {
                self.persist(&state, Section::Summaries);
            }
            if state.open.remove(work_key).is_some() {
                self.persist(&state, Section::Open);
            }
        }

        log::info!("Removed {} from the library", key);
        self.emit(LibraryEvent::Removed {
            key: key.to_string(),
        });
        true
    }

    /// Sets the reading status of `key`; returns `false` if it is not present
    pub fn update_status(&self, key: &str, status: ReadingStatus) -> bool {
        let mut state = self.lock();
        let Some(index) = state.position(key) else {
            return false;
        };

        state.entries[index].status = status;
        self.persist(&state, Section::Library);
        self.emit(LibraryEvent::StatusChanged {
            key: key.to_string(),
            status,
        });
        true
    }

    /// Sets the rating of `key`; returns `false` if it is not present
    pub fn update_rating(&self, key: &str, rating: Rating) -> bool {
        let mut state = self.lock();
        let Some(index) = state.position(key) else {
            return false;
        };

        state.entries[index].rating = rating;
        self.persist(&state, Section::Library);
        self.emit(LibraryEvent::RatingChanged {
            key: key.to_string(),
            rating,
        });
        true
    }

    /// Flips the summary panel of a work and returns the new state
    ///
    /// Opening a panel whose summary is not cached starts a fetch. Work keys
    /// that no entry owns are ignored and report closed.
    pub fn toggle_summary(&self, work_key: &str) -> bool {
        let (open, pending) = {
            let mut state = self.lock();
            if !state.owns_work_key(work_key) {
                return false;
            }

            let open = !state.open.get(work_key).copied().unwrap_or(false);
            state.open.insert(work_key.to_string(), open);
            self.persist(&state, Section::Open);
            self.emit(LibraryEvent::SummaryToggled {
                work_key: work_key.to_string(),
                open,
            });

            let pending = if open {
                self.claim_fetch(&mut state, work_key)
            } else {
                None
            };
            (open, pending)
        };

        self.spawn_fetch(pending);
        open
    }

    /// Starts fetches for every entry whose summary is missing
    ///
    /// Returns the number of fetches started.
    pub fn fetch_missing_summaries(&self) -> usize {
        let pending: Vec<PendingFetch> = {
            let mut state = self.lock();
            let work_keys: Vec<String> = state
                .entries
                .iter()
                .map(|e| e.work_key().to_string())
                .collect();
            work_keys
                .iter()
                .filter_map(|wk| self.claim_fetch(&mut state, wk))
                .collect()
        };

        let started = pending.len();
        for fetch in pending {
            self.spawn_fetch(Some(fetch));
        }
        started
    }

    /// Starts a fetch for one work unless its summary is cached or loading
    ///
    /// Returns whether a fetch for it is in flight afterwards.
    pub fn request_summary(&self, work_key: &str) -> bool {
        let (pending, loading) = {
            let mut state = self.lock();
            if !state.owns_work_key(work_key) {
                return false;
            }
            let pending = self.claim_fetch(&mut state, work_key);
            (pending, state.loading.contains_key(work_key))
        };

        self.spawn_fetch(pending);
        loading
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<LibraryEntry> {
        let state = self.lock();
        state.position(key).map(|i| state.entries[i].clone())
    }

    /// All entries in the order they were added
    pub fn entries(&self) -> Vec<LibraryEntry> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn summary(&self, work_key: &str) -> Option<String> {
        self.lock().summaries.get(work_key).cloned()
    }

    pub fn is_loading(&self, work_key: &str) -> bool {
        self.lock().loading.contains_key(work_key)
    }

    pub fn is_open(&self, work_key: &str) -> bool {
        self.lock().open.get(work_key).copied().unwrap_or(false)
    }

    pub fn snapshot(&self) -> LibrarySnapshot {
        let state = self.lock();
        LibrarySnapshot {
            entries: state.entries.clone(),
            summaries: state.summaries.clone(),
            loading: state.loading.keys().cloned().collect(),
            open_summaries: state.open.clone(),
        }
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::from_entries(&self.lock().entries)
    }

    fn lock(&self) -> MutexGuard<'_, LibraryState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: LibraryEvent) {
        // No subscribers is not an error
        let _ = self.inner.events.send(event);
    }

    fn persist(&self, state: &LibraryState, section: Section) {
        let persistence = &self.inner.persistence;
        let (key, result) = match section {
            Section::Library => (keys::LIBRARY, persistence.save_json(keys::LIBRARY, &state.entries)),
            Section::Summaries => (
                keys::SUMMARIES,
                persistence.save_json(keys::SUMMARIES, &state.summaries),
            ),
            Section::Open => (
                keys::OPEN_SUMMARIES,
                persistence.save_json(keys::OPEN_SUMMARIES, &state.open),
            ),
        };
        if let Err(e) = result {
            log::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn claim_fetch(&self, state: &mut LibraryState, work_key: &str) -> Option<PendingFetch> {
        if self.inner.runtime.is_none() {
            if !state.summaries.contains_key(work_key) {
                log::warn!("Skipping summary fetch for {}: no async runtime", work_key);
            }
            return None;
        }

        let ticket = state.claim_fetch(work_key)?;
        self.emit(LibraryEvent::SummaryLoading {
            work_key: work_key.to_string(),
        });
        Some(PendingFetch {
            work_key: work_key.to_string(),
            ticket,
        })
    }

    /// Spawns a claimed fetch; must be called without the state lock held
    fn spawn_fetch(&self, pending: Option<PendingFetch>) {
        let (Some(fetch), Some(runtime)) = (pending, self.inner.runtime.as_ref()) else {
            return;
        };

        log::debug!("Fetching summary for {}", fetch.work_key);
        let mut guard = FetchGuard {
            store: self.clone(),
            fetch,
        };
        runtime.spawn(async move {
            let catalog = Arc::clone(&guard.store.inner.catalog);
            let summary = catalog.fetch_summary(&guard.fetch.work_key).await;
            guard.complete(summary);
        });
    }

    /// Applies a finished fetch if it is still current and its work is owned
    fn finish_fetch(&self, work_key: &str, ticket: u64, summary: Option<String>) {
        let mut state = self.lock();
        if state.loading.get(work_key) != Some(&ticket) {
            log::debug!("Discarding stale summary for {}", work_key);
            return;
        }
        state.loading.remove(work_key);

        let Some(summary) = summary else {
            log::warn!("Summary fetch for {} was cancelled", work_key);
            return;
        };

        if !state.owns_work_key(work_key) {
            log::debug!("Discarding summary for removed work {}", work_key);
            return;
        }

        state.summaries.insert(work_key.to_string(), summary);
        self.persist(&state, Section::Summaries);
        self.emit(LibraryEvent::SummaryLoaded {
            work_key: work_key.to_string(),
        });
    }
}

impl std::fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag even if the fetch task panics or is dropped
struct FetchGuard {
    store: LibraryStore,
    fetch: PendingFetch,
}

impl FetchGuard {
    fn complete(&mut self, summary: String) {
        self.store
            .finish_fetch(&self.fetch.work_key, self.fetch.ticket, Some(summary));
        // Completed: make the drop below a no-op
        self.fetch.ticket = 0;
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if self.fetch.ticket != 0 {
            self.store
                .finish_fetch(&self.fetch.work_key, self.fetch.ticket, None);
        }
    }
}

/// Drops entries whose key already appeared earlier
fn dedupe(entries: &mut Vec<LibraryEntry>) {
    let before = entries.len();
    let mut seen = std::collections::HashSet::new();
    entries.retain(|e| seen.insert(e.key().to_string()));
    if entries.len() != before {
        log::warn!(
            "Dropped {} duplicate library entries",
            before - entries.len()
        );
    }
}
