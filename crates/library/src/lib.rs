//! Shelfwise library management
//!
//! [`LibraryStore`] is the single source of truth for the personal library:
//! entries, their reading status and rating, the summary cache and the
//! summary panel state. It persists every change through
//! [`shelfwise_storage::PersistentStore`] and fetches summaries lazily from a
//! [`shelfwise_catalog::Catalog`].
//!
//! ```rust,no_run
//! use shelfwise_catalog::OpenLibrary;
//! use shelfwise_config::CatalogConfig;
//! use shelfwise_core::BookRecord;
//! use shelfwise_library::LibraryStore;
//! use shelfwise_storage::PersistentStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(OpenLibrary::new(&CatalogConfig::default())?);
//! let store = LibraryStore::new(PersistentStore::open_dir("/tmp/shelfwise")?, catalog);
//!
//! store.add(BookRecord::new("/works/OL893415W", "Dune", "Frank Herbert"));
//! println!("{} books", store.len());
//! # Ok(())
//! # }
//! ```

mod events;
mod snapshot;
mod store;

pub use events::LibraryEvent;
pub use snapshot::LibrarySnapshot;
pub use store::LibraryStore;
