use super::*;
use async_trait::async_trait;
use shelfwise_catalog::{total_pages, CatalogResult, SearchPage, SourceMetadata};
use shelfwise_core::BookRecord;
use shelfwise_storage::keys;
use tempfile::TempDir;

struct StaticCatalog;

#[async_trait]
impl Catalog for StaticCatalog {
    async fn search(&self, _query: &str, page: u32) -> CatalogResult<SearchPage> {
        Ok(SearchPage {
            books: vec![
                BookRecord::new("/works/OL1W", "Dune", "Frank Herbert").with_cover(12345),
                BookRecord::new("/works/OL2W", "Dune Messiah", "Frank Herbert"),
            ],
            total_results: 250,
            page,
            total_pages: total_pages(250, 100),
        })
    }

    async fn fetch_summary(&self, work_key: &str) -> String {
        format!("About {work_key}.")
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Static".to_string(),
            description: "Fixed results".to_string(),
            base_url: "memory://".to_string(),
            requires_auth: false,
        }
    }
}

fn open_session(dir: &TempDir) -> Session {
    Session::with_catalog(
        Config::default(),
        dir.path().to_path_buf(),
        Arc::new(StaticCatalog),
    )
    .unwrap()
}

#[tokio::test]
async fn test_add_picks_result_and_caches_summary() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);

    add(&session, "dune", 1, 2).await.unwrap();

    let entry = session.store.get("/works/OL2W").unwrap();
    assert_eq!(entry.book.title, "Dune Messiah");
    assert_eq!(entry.status, ReadingStatus::Owned);
    assert_eq!(session.store.summary("OL2W").as_deref(), Some("About OL2W."));
    assert!(dir.path().join(format!("{}.json", keys::SUMMARIES)).exists());
}

#[tokio::test]
async fn test_add_twice_keeps_one_entry() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);

    add(&session, "dune", 1, 1).await.unwrap();
    add(&session, "dune", 1, 1).await.unwrap();
    assert_eq!(session.store.len(), 1);
}

#[tokio::test]
async fn test_add_rejects_missing_pick() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);

    assert!(add(&session, "dune", 1, 0).await.is_err());
    assert!(add(&session, "dune", 1, 3).await.is_err());
    assert!(session.store.is_empty());
}

#[tokio::test]
async fn test_summary_fetches_when_missing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(format!("{}.json", keys::LIBRARY)),
        r#"[{"key": "/works/OL1W", "title": "Dune", "author": "Frank Herbert"}]"#,
    )
    .unwrap();
    let session = open_session(&dir);

    summary(&session, "OL1W").await.unwrap();
    assert_eq!(session.store.summary("OL1W").as_deref(), Some("About OL1W."));
}

#[test]
fn test_edits_persist_across_sessions() {
    let dir = TempDir::new().unwrap();
    {
        let session = open_session(&dir);
        session.store.add(BookRecord::new("/works/OL1W", "Dune", "Frank Herbert"));
        set_status(&session, "OL1W", "finished").unwrap();
        rate(&session, "/works/OL1W", 4).unwrap();
    }

    let session = open_session(&dir);
    let entry = session.store.get("/works/OL1W").unwrap();
    assert_eq!(entry.status, ReadingStatus::Finished);
    assert_eq!(entry.rating.value(), 4);
    assert!(list(&session, true).is_ok());
}

#[test]
fn test_resolve_key_accepts_work_id() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);
    session.store.add(BookRecord::new("/works/OL1W", "Dune", "Frank Herbert"));

    assert_eq!(resolve_key(&session.store, "/works/OL1W").unwrap(), "/works/OL1W");
    assert_eq!(resolve_key(&session.store, "OL1W").unwrap(), "/works/OL1W");
    assert_eq!(resolve_key(&session.store, "works/OL1W").unwrap(), "/works/OL1W");
    assert!(resolve_key(&session.store, "OL9W").is_err());
    assert!(set_status(&session, "OL9W", "started").is_err());
}

#[test]
fn test_remove_unknown_key_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);
    session.store.add(BookRecord::new("/works/OL1W", "Dune", "Frank Herbert"));

    remove(&session, "OL9W").unwrap();
    assert_eq!(session.store.len(), 1);
    remove(&session, "OL1W").unwrap();
    assert!(session.store.is_empty());
}

#[test]
fn test_export_writes_camel_case_json() {
    let dir = TempDir::new().unwrap();
    let session = open_session(&dir);
    session
        .store
        .add(BookRecord::new("/works/OL1W", "Dune", "Frank Herbert").with_cover(12345));

    let output = dir.path().join("export.json");
    export(&session, Some(&output)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["entries"][0]["workKey"], "OL1W");
    assert_eq!(json["entries"][0]["coverId"], 12345);
    assert!(json["openSummaries"].is_object());
}

#[test]
fn test_config_init_then_path() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(dir.path().to_path_buf()).unwrap();
    let cli = clap::Command::new("config")
        .subcommand(clap::Command::new("init"))
        .subcommand(clap::Command::new("show"));

    let matches = cli.clone().try_get_matches_from(["config", "init"]).unwrap();
    config(&manager, &matches).unwrap();
    assert!(manager.config_path().exists());

    let matches = cli.try_get_matches_from(["config", "show"]).unwrap();
    config(&manager, &matches).unwrap();
}

#[test]
fn test_format_entry_shows_status_and_stars() {
    let mut entry = LibraryEntry::from_book(BookRecord::new("/works/OL1W", "Dune", "Frank Herbert"));
    entry.rating = Rating::new(2).unwrap();
    let line = console::strip_ansi_codes(&format_entry(&entry)).to_string();

    assert!(line.contains("Dune"));
    assert!(line.contains("★★☆☆☆"));
    assert!(line.contains("[Owned]"));
    assert!(line.contains("by Frank Herbert"));
}
