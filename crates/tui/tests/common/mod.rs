//! Shared fixtures for the TUI tests

#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shelfwise_catalog::{
    total_pages, Catalog, CatalogError, CatalogResult, SearchPage, SourceMetadata,
};
use shelfwise_config::Config;
use shelfwise_core::BookRecord;
use shelfwise_library::LibraryStore;
use shelfwise_storage::PersistentStore;
use shelfwise_tui::App;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Catalog double with a fixed result set
///
/// The query `fail` produces a server error.
pub struct FakeCatalog;

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, query: &str, page: u32) -> CatalogResult<SearchPage> {
        if query == "fail" {
            return Err(CatalogError::Http {
                status: 503,
                reason: "Service Unavailable".to_string(),
            });
        }
        Ok(SearchPage {
            books: vec![dune(), left_hand()],
            total_results: 250,
            page: page.max(1),
            total_pages: total_pages(250, 100),
        })
    }

    async fn fetch_summary(&self, work_key: &str) -> String {
        format!("Summary of {work_key}.")
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

pub fn new_store() -> LibraryStore {
    LibraryStore::new(PersistentStore::in_memory(), Arc::new(FakeCatalog))
}

pub fn new_app(store: &LibraryStore) -> App {
    App::new(store.clone(), &Config::default()).expect("tests run inside a runtime")
}

pub fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Ticks the app until `done` holds, failing after two seconds
pub async fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
    for _ in 0..200 {
        app.tick(Instant::now());
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
