//! Shelfwise persistence
//!
//! A synchronous string key-value store ([`KeyValueStore`]) with two
//! backends, plus [`PersistentStore`], which layers JSON on top and turns
//! corrupt or missing values into defaults.
//!
//! ```rust,no_run
//! use shelfwise_storage::{keys, PersistentStore};
//! use std::collections::HashMap;
//!
//! let store = PersistentStore::open_dir("/tmp/shelfwise").expect("data dir");
//! let summaries: HashMap<String, String> = store.load_json(keys::SUMMARIES);
//! println!("{} cached summaries", summaries.len());
//! ```

mod error;
mod file;
mod memory;
mod persistent;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistent::PersistentStore;

/// Keys under which the library state is persisted
pub mod keys {
    /// JSON array of library entries
    pub const LIBRARY: &str = "myLibrary";

    /// JSON object mapping work keys to summary text
    pub const SUMMARIES: &str = "librarySummaries";

    /// JSON object mapping work keys to the summary panel's open state
    pub const OPEN_SUMMARIES: &str = "libraryOpenSummaries";

    /// All keys, in the order they are written
    pub const ALL: [&str; 3] = [LIBRARY, SUMMARIES, OPEN_SUMMARIES];
}

/// Opaque string store
///
/// Implementations must be safe to call from any thread; every call is
/// expected to complete before it returns.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`; deleting an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}
