//! File-backed store: one `<key>.json` file per key

use crate::{KeyValueStore, StorageError, StorageResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores each key as `<dir>/<key>.json`
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the target, so a crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store in `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            log::info!("Created data directory: {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(value.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&path).map_err(|e| write_err(e.error))?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("Failed to open store");
        (temp_dir, store)
    }

    #[test]
    fn test_missing_key_is_none() {
        let (_dir, store) = setup();
        assert_eq!(store.get("myLibrary").unwrap(), None);
    }

    #[test]
    fn test_set_writes_key_file() {
        let (dir, store) = setup();
        store.set("librarySummaries", "{}").unwrap();

        let on_disk = fs::read_to_string(dir.path().join("librarySummaries.json")).unwrap();
        assert_eq!(on_disk, "{}");
        assert_eq!(store.get("librarySummaries").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let (dir, store) = setup();
        store.set("myLibrary", "[1]").unwrap();
        store.set("myLibrary", "[1,2]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("myLibrary.json")]);
        assert_eq!(store.get("myLibrary").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = setup();
        store.set("libraryOpenSummaries", "{}").unwrap();
        store.remove("libraryOpenSummaries").unwrap();
        store.remove("libraryOpenSummaries").unwrap();
        assert_eq!(store.get("libraryOpenSummaries").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, store) = setup();
        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey { .. })
            ));
        }
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }
}
