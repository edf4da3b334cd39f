//! File-backed persistence across store instances

use serde::{Deserialize, Serialize};
use shelfwise_storage::{keys, KeyValueStore, PersistentStore};
use std::collections::BTreeMap;
use tempfile::TempDir;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Shelf {
    work_key: String,
    count: u32,
}

#[test]
fn test_values_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    {
        let store = PersistentStore::open_dir(dir.path())?;
        store.save_json(
            keys::LIBRARY,
            &vec![Shelf {
                work_key: "OL1W".to_string(),
                count: 2,
            }],
        )?;
        let mut summaries = BTreeMap::new();
        summaries.insert("OL1W", "A desert planet.");
        store.save_json(keys::SUMMARIES, &summaries)?;
    }

    let reopened = PersistentStore::open_dir(dir.path())?;
    let shelves: Vec<Shelf> = reopened.load_json(keys::LIBRARY);
    assert_eq!(shelves.len(), 1);
    assert_eq!(shelves[0].work_key, "OL1W");

    let summaries: BTreeMap<String, String> = reopened.load_json(keys::SUMMARIES);
    assert_eq!(summaries["OL1W"], "A desert planet.");

    assert!(dir.path().join("myLibrary.json").is_file());
    assert!(dir.path().join("librarySummaries.json").is_file());
    Ok(())
}

#[test]
fn test_hand_corrupted_file_degrades_to_default() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("myLibrary.json"), "[{\"key\": ")?;

    let store = PersistentStore::open_dir(dir.path())?;
    let shelves: Vec<Shelf> = store.load_json(keys::LIBRARY);
    assert!(shelves.is_empty());

    // The corrupt file is left alone until the next write
    assert!(store.backend().get(keys::LIBRARY)?.is_some());
    Ok(())
}

#[test]
fn test_all_keys_are_valid_file_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let store = PersistentStore::open_dir(dir.path())?;
    for key in keys::ALL {
        store.save_json(key, &Vec::<u8>::new())?;
        assert_eq!(store.load_raw(key)?.as_deref(), Some("[]"));
    }
    Ok(())
}
