use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use console::style;
use shelfwise_catalog::{Catalog, OpenLibrary};
use shelfwise_config::{Config, ConfigManager};
use shelfwise_core::{LibraryEntry, Rating, ReadingStatus};
use shelfwise_library::{LibraryEvent, LibraryStore};
use shelfwise_storage::PersistentStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};

/// Everything a command needs: the effective config and the opened library
pub struct Session {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: LibraryStore,
}

impl Session {
    /// Opens the library in `data_dir` against the configured catalog
    pub fn open(config: Config, data_dir: PathBuf) -> Result<Self> {
        let catalog =
            OpenLibrary::new(&config.catalog).context("Failed to set up the catalog client")?;
        Self::with_catalog(config, data_dir, Arc::new(catalog))
    }

    pub fn with_catalog(config: Config, data_dir: PathBuf, catalog: Arc<dyn Catalog>) -> Result<Self> {
        let persistence = PersistentStore::open_dir(&data_dir)
            .with_context(|| format!("Failed to open library in {}", data_dir.display()))?;
        log::debug!("Library directory: {}", data_dir.display());

        Ok(Self {
            config,
            data_dir,
            store: LibraryStore::new(persistence, catalog),
        })
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.config.catalog.timeout_secs)
    }
}

/// Search the catalog and print one page of results
pub async fn search(session: &Session, query: &str, page: u32) -> Result<()> {
    let results = session
        .store
        .catalog()
        .search(query, page)
        .await
        .with_context(|| format!("Search for {query:?} failed"))?;

    if results.is_empty() {
        println!("No books found matching {query:?}");
        return Ok(());
    }

    println!(
        "\nResults for {} (page {} of {}, {} results)",
        style(query).bold(),
        results.page,
        results.total_pages.max(1),
        results.total_results
    );
    println!("{}", "=".repeat(80));

    for (i, book) in results.books.iter().enumerate() {
        println!("{:>3}. {}", i + 1, style(&book.title).bold());
        let owned = if session.store.contains(&book.key) {
            style(" ✓ in library").green().to_string()
        } else {
            String::new()
        };
        println!("     by {}  {}{}", book.author, style(&book.key).dim(), owned);
    }

    if results.has_next() {
        println!("\nMore results: --page {}", results.page + 1);
    }
    Ok(())
}

/// Add result number `pick` (1-based) of a search to the library
pub async fn add(session: &Session, query: &str, page: u32, pick: usize) -> Result<()> {
    let results = session
        .store
        .catalog()
        .search(query, page)
        .await
        .with_context(|| format!("Search for {query:?} failed"))?;

    let book = pick
        .checked_sub(1)
        .and_then(|i| results.books.get(i))
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "No result number {pick} on page {page} ({} results shown)",
                results.books.len()
            )
        })?;

    let events = session.store.subscribe();
    let title = book.title.clone();
    let work_key = book.work_key.clone();
    if !session.store.add(book) {
        println!(
            "{} \"{}\" is already in your library",
            style("!").yellow().bold(),
            title
        );
        return Ok(());
    }

    println!("{} Added \"{}\"", style("✓").green().bold(), title);
    if !wait_for_summary(&session.store, events, &work_key, session.fetch_timeout()).await {
        log::warn!("Summary for {work_key} was not fetched in time");
    }
    Ok(())
}

/// Print the library, optionally only finished books
pub fn list(session: &Session, finished_only: bool) -> Result<()> {
    let entries: Vec<LibraryEntry> = session
        .store
        .entries()
        .into_iter()
        .filter(|e| !finished_only || e.is_finished())
        .collect();

    if entries.is_empty() {
        if session.store.is_empty() {
            println!("Your library is empty. Use 'add' to add books from the catalog.");
        } else {
            println!("No finished books yet.");
        }
        return Ok(());
    }

    println!("\n{} Books in Library", style(entries.len()).bold().cyan());
    println!("{}", "=".repeat(80));
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// Remove a book; unknown keys only print a note
pub fn remove(session: &Session, key: &str) -> Result<()> {
    let Ok(key) = resolve_key(&session.store, key) else {
        println!("{key:?} is not in your library");
        return Ok(());
    };

    let title = session.store.get(&key).map(|e| e.book.title).unwrap_or_default();
    session.store.remove(&key);
    println!("{} Removed \"{}\"", style("✓").green().bold(), title);
    Ok(())
}

pub fn set_status(session: &Session, key: &str, status: &str) -> Result<()> {
    let key = resolve_key(&session.store, key)?;
    let status: ReadingStatus = status.parse()?;

    session.store.update_status(&key, status);
    println!("{} Marked {} as {}", style("✓").green().bold(), key, status.label());
    Ok(())
}

pub fn rate(session: &Session, key: &str, stars: u8) -> Result<()> {
    let key = resolve_key(&session.store, key)?;
    let rating = Rating::new(stars)?;

    session.store.update_rating(&key, rating);
    println!(
        "{} Rated {} {}",
        style("✓").green().bold(),
        key,
        style(rating.stars()).yellow()
    );
    Ok(())
}

/// Print a book's summary, fetching it first when it is not cached
pub async fn summary(session: &Session, key: &str) -> Result<()> {
    let key = resolve_key(&session.store, key)?;
    let entry = session
        .store
        .get(&key)
        .ok_or_else(|| anyhow!("{key} is not in your library"))?;
    let work_key = entry.work_key().to_string();

    if session.store.summary(&work_key).is_none() {
        let events = session.store.subscribe();
        session.store.request_summary(&work_key);
        wait_for_summary(&session.store, events, &work_key, session.fetch_timeout()).await;
    }

    println!("\n{}", style(&entry.book.title).bold());
    println!("  by {}\n", entry.book.author);
    match session.store.summary(&work_key) {
        Some(text) => println!("{text}"),
        None => println!("The summary could not be fetched. Try again later."),
    }
    Ok(())
}

pub fn stats(session: &Session) -> Result<()> {
    let stats = session.store.stats();

    println!("\n{}", style("Library Statistics").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Total Books: {}", style(stats.total_books).bold());
    println!("Authors: {}", stats.authors_count);
    println!(
        "Finished: {} ({:.0}%)",
        style(stats.finished_count).bold(),
        stats.finished_percentage()
    );
    println!("Not finished: {}", stats.unfinished_count);

    println!("\nBy status:");
    for status in ReadingStatus::all() {
        println!("  {:<10} {}", status.label(), stats.by_status.get(status));
    }

    println!("\nBy rating:");
    for stars in (1..=Rating::MAX).rev() {
        let count = stats.rated(stars);
        println!("  {:<6} {:>3} {}", format!("{stars}★"), count, "█".repeat(count));
    }
    println!("  {:<6} {:>3}", "none", stats.unrated_count);

    if let Some(average) = stats.average_rating() {
        println!("\nAverage rating: {average:.1}");
    }
    Ok(())
}

/// Write the library, summaries and panel state as pretty JSON
pub fn export(session: &Session, output: Option<&PathBuf>) -> Result<()> {
    let snapshot = session.store.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize the library")?;

    match output {
        Some(path) => {
            write_export(path, &json)?;
            println!(
                "{} Exported {} books to {}",
                style("✓").green().bold(),
                snapshot.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn write_export(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export file {}", path.display()))
}

/// `config init|show|path`
pub fn config(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            if manager.initialize().context("Failed to write the default configuration")? {
                println!(
                    "{} Created {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!("{} already exists", manager.config_path().display());
            }
        }
        Some(("show", _)) => {
            let config = manager
                .load_with_env_overrides()
                .context("Failed to load the configuration")?;
            let text = toml::to_string_pretty(&config).context("Failed to render the configuration")?;
            print!("{text}");
        }
        Some(("path", _)) => println!("{}", manager.config_path().display()),
        _ => bail!("Unknown config command"),
    }
    Ok(())
}

/// Maps a full key or a bare work id to the key of an entry in the library
pub fn resolve_key(store: &LibraryStore, arg: &str) -> Result<String> {
    let arg = arg.trim();
    if store.contains(arg) {
        return Ok(arg.to_string());
    }

    store
        .entries()
        .into_iter()
        .find(|e| e.work_key() == arg || e.key().trim_start_matches('/') == arg)
        .map(|e| e.key().to_string())
        .ok_or_else(|| anyhow!("No book with key {arg:?} in your library"))
}

/// Waits until `work_key` has a cached summary
///
/// `events` must be subscribed before the fetch was started.
async fn wait_for_summary(
    store: &LibraryStore,
    mut events: broadcast::Receiver<LibraryEvent>,
    work_key: &str,
    timeout: Duration,
) -> bool {
    let wait = async {
        while store.is_loading(work_key) {
            match events.recv().await {
                Ok(LibraryEvent::SummaryLoaded { work_key: loaded }) if loaded == work_key => break,
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
        store.summary(work_key).is_some()
    };
    tokio::time::timeout(timeout, wait).await.unwrap_or(false)
}

fn format_entry(entry: &LibraryEntry) -> String {
    format!(
        "\n{}  {}  [{}]\n  by {}  {}",
        style(&entry.book.title).bold(),
        style(entry.rating.stars()).yellow(),
        entry.status.label(),
        entry.book.author,
        style(entry.key()).dim()
    )
}

#[cfg(test)]
mod tests;
