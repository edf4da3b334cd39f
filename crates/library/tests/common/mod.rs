//! Shared fixtures for the library store tests

#![allow(dead_code)]

use async_trait::async_trait;
use shelfwise_catalog::{
    Catalog, CatalogResult, SearchPage, SourceMetadata, SUMMARY_FAILED, SUMMARY_MISSING,
};
use shelfwise_core::BookRecord;
use shelfwise_library::LibraryEvent;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch, Semaphore};

/// Catalog double that counts summary requests
///
/// When gated, every `fetch_summary` call waits for a permit released by
/// [`FakeCatalog::release`]. A failing catalog answers every summary request
/// the way the real client does when the request fails.
pub struct FakeCatalog {
    summaries: HashMap<String, String>,
    gate: Option<Semaphore>,
    failing: bool,
    calls: AtomicUsize,
    finished: watch::Sender<usize>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            summaries: HashMap::new(),
            gate: None,
            failing: false,
            calls: AtomicUsize::new(0),
            finished: watch::Sender::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn with_summary(mut self, work_key: &str, summary: &str) -> Self {
        self.summaries
            .insert(work_key.to_string(), summary.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Waits until `count` summary requests have returned
    ///
    /// The store applies a result in the same task poll that the request
    /// returns in, so on a current-thread runtime the result is applied (or
    /// discarded) by the time this resolves.
    pub async fn wait_for_fetches(&self, count: usize) {
        let mut finished = self.finished.subscribe();
        tokio::time::timeout(Duration::from_secs(5), finished.wait_for(|n| *n >= count))
            .await
            .expect("summary requests did not finish in time")
            .expect("fake catalog dropped");
        tokio::task::yield_now().await;
    }

    pub fn release(&self, fetches: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(fetches);
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, _query: &str, page: u32) -> CatalogResult<SearchPage> {
        Ok(SearchPage {
            page,
            ..SearchPage::default()
        })
    }

    async fn fetch_summary(&self, work_key: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        let summary = if self.failing {
            SUMMARY_FAILED.to_string()
        } else {
            self.summaries
                .get(work_key)
                .cloned()
                .unwrap_or_else(|| SUMMARY_MISSING.to_string())
        };
        self.finished.send_modify(|n| *n += 1);
        summary
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Fake".to_string(),
            description: "In-memory test catalog".to_string(),
            base_url: "memory://".to_string(),
            requires_auth: false,
        }
    }
}

pub fn dune() -> BookRecord {
    BookRecord::new("/works/OL1W", "Dune", "Frank Herbert").with_cover(12345)
}

pub fn left_hand() -> BookRecord {
    BookRecord::new("/works/OL2W", "The Left Hand of Darkness", "Ursula K. Le Guin")
}

/// Waits until the summary for `work_key` has been stored
pub async fn wait_for_summary(rx: &mut broadcast::Receiver<LibraryEvent>, work_key: &str) {
    let wait = async {
        loop {
            match rx.recv().await {
                Ok(LibraryEvent::SummaryLoaded { work_key: loaded }) if loaded == work_key => {
                    return;
                }
                Ok(_) => continue,
                Err(e) => panic!("event channel failed: {e}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("summary was not loaded in time");
}
