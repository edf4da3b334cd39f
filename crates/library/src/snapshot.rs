//! Immutable copy of the store state for rendering

use serde::Serialize;
use shelfwise_core::{LibraryEntry, LibraryStats};
use std::collections::{BTreeMap, BTreeSet};

/// Point-in-time copy of everything the library store holds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    /// Entries in the order they were added
    pub entries: Vec<LibraryEntry>,
    /// Cached summaries by work key
    pub summaries: BTreeMap<String, String>,
    /// Work keys with a fetch in flight
    #[serde(skip)]
    pub loading: BTreeSet<String>,
    /// Summary panel state by work key
    pub open_summaries: BTreeMap<String, bool>,
}

impl LibrarySnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn summary(&self, work_key: &str) -> Option<&str> {
        self.summaries.get(work_key).map(String::as_str)
    }

    pub fn is_loading(&self, work_key: &str) -> bool {
        self.loading.contains(work_key)
    }

    pub fn is_open(&self, work_key: &str) -> bool {
        self.open_summaries.get(work_key).copied().unwrap_or(false)
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::from_entries(&self.entries)
    }

    /// Finished and not-finished entries, each in library order
    pub fn partition_finished(&self) -> (Vec<&LibraryEntry>, Vec<&LibraryEntry>) {
        LibraryStats::partition_finished(&self.entries)
    }
}
