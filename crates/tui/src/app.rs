//! Main application logic

use crate::{
    collection::{CollectionView, ShelfFilter},
    error::{TuiError, TuiResult},
    events::{AppEvent, EventHandler},
    search::{SearchRequest, SearchState},
    state::{AppState, View},
    theme::{Theme, ThemeType},
    ui,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Frame, Terminal};
use shelfwise_catalog::{CatalogResult, SearchPage};
use shelfwise_config::{CatalogConfig, Config};
use shelfwise_core::Rating;
use shelfwise_library::{LibraryEvent, LibrarySnapshot, LibraryStore};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc;

type SearchOutcome = (u64, CatalogResult<SearchPage>);

/// Which part of the search view takes keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

/// The main TUI application
pub struct App {
    state: AppState,
    search: SearchState,
    search_focus: SearchFocus,
    store: LibraryStore,
    runtime: Handle,
    catalog_config: CatalogConfig,
    outcomes_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<SearchOutcome>,
    changes: broadcast::Receiver<LibraryEvent>,
    snapshot: LibrarySnapshot,
    collection: CollectionView,
    filter: ShelfFilter,
    event_handler: EventHandler,
    theme: Theme,
}

impl App {
    /// Creates the application on the current Tokio runtime
    pub fn new(store: LibraryStore, config: &Config) -> TuiResult<Self> {
        let runtime = Handle::try_current().map_err(|_| TuiError::NoRuntime)?;
        Ok(Self::with_runtime(store, config, runtime))
    }

    /// Creates the application, running catalog requests on `runtime`
    pub fn with_runtime(store: LibraryStore, config: &Config, runtime: Handle) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let changes = store.subscribe();
        let theme_type = ThemeType::from_name(&config.ui.theme);

        let mut state = AppState::new();
        state.theme = theme_type;

        let mut app = Self {
            state,
            search: SearchState::new(Duration::from_secs(config.ui.notice_secs)),
            search_focus: SearchFocus::Input,
            store,
            runtime,
            catalog_config: config.catalog.clone(),
            outcomes_tx,
            outcomes_rx,
            changes,
            snapshot: LibrarySnapshot::default(),
            collection: CollectionView::default(),
            filter: ShelfFilter::default(),
            event_handler: EventHandler::new(Duration::from_millis(config.ui.tick_rate_ms)),
            theme: Theme::new(theme_type),
        };

        let started = app.store.fetch_missing_summaries();
        if started > 0 {
            log::info!("Fetching {started} missing summaries");
        }
        app.refresh();
        app
    }

    /// Runs the draw/input loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> TuiResult<()> {
        while !self.state.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match self.event_handler.next()? {
                AppEvent::Key(key) => self.handle_key(key),
                AppEvent::Quit => self.state.quit(),
                AppEvent::Tick => self.tick(Instant::now()),
                AppEvent::Resize(_, _) => {}
            }
        }

        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    /// Applies finished searches, store changes and notice expiry
    pub fn tick(&mut self, now: Instant) {
        while let Ok((generation, outcome)) = self.outcomes_rx.try_recv() {
            self.search.finish(generation, outcome);
        }

        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(_) => changed = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    log::debug!("Missed {skipped} library events");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.refresh();
        }

        self.search.tick(now);
    }

    /// Handles one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Status messages last until the next key press
        self.state.clear_status();

        if self.is_typing() {
            self.handle_input_keys(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.state.quit();
                return;
            }
            KeyCode::Tab => {
                self.set_view(self.state.view.next());
                return;
            }
            KeyCode::BackTab => {
                self.set_view(self.state.view.previous());
                return;
            }
            KeyCode::Char('?') => {
                let view = if self.state.view == View::Help {
                    View::Library
                } else {
                    View::Help
                };
                self.set_view(view);
                return;
            }
            KeyCode::Char('t') => {
                self.state.next_theme();
                self.theme = Theme::new(self.state.theme);
                self.state.set_status(format!("Theme: {}", self.state.theme.name()));
                return;
            }
            KeyCode::Char('/') => {
                self.set_view(View::Search);
                self.search_focus = SearchFocus::Input;
                return;
            }
            _ => {}
        }

        match self.state.view {
            View::Library => self.handle_library_keys(key),
            View::Search => self.handle_results_keys(key),
            View::Statistics => {}
            View::Help => {
                if key.code == KeyCode::Esc {
                    self.set_view(View::Library);
                }
            }
        }
    }

    fn handle_input_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.set_view(View::Library),
            KeyCode::Tab => self.set_view(self.state.view.next()),
            KeyCode::BackTab => self.set_view(self.state.view.previous()),
            KeyCode::Enter => {
                if let Some(request) = self.search.submit() {
                    self.dispatch(request);
                    self.search_focus = SearchFocus::Results;
                }
            }
            KeyCode::Down => self.search_focus = SearchFocus::Results,
            KeyCode::Backspace => {
                self.search.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_results_keys(&mut self, key: KeyEvent) {
        let request = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.select_next();
                None
            }
            KeyCode::Enter | KeyCode::Char('a') => {
                if self.search.add_selected(&self.store, Instant::now()) {
                    self.refresh();
                }
                None
            }
            KeyCode::Right | KeyCode::Char('n') => self.search.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.search.previous_page(),
            KeyCode::Char('i') => {
                self.search_focus = SearchFocus::Input;
                None
            }
            KeyCode::Esc => {
                self.search.reset();
                self.search_focus = SearchFocus::Input;
                None
            }
            _ => None,
        };

        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    fn handle_library_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.state.reset_selection();
                self.refresh();
                self.state
                    .set_status(format!("Showing: {}", self.filter.label()));
            }
            _ => self.handle_entry_keys(key),
        }
    }

    /// Keys that act on the highlighted library entry
    fn handle_entry_keys(&mut self, key: KeyEvent) {
        let Some(row) = self.collection.row(self.state.selected_item).cloned() else {
            return;
        };

        let (changed, message) = match key.code {
            KeyCode::Char('s') => {
                let status = row.status.next();
                (
                    self.store.update_status(&row.key, status),
                    format!("\"{}\" marked {}", row.title, status.label()),
                )
            }
            KeyCode::Char(c @ '0'..='5') => {
                let stars = c.to_digit(10).map_or(0, i64::from);
                let rating = Rating::clamped(stars);
                (
                    self.store.update_rating(&row.key, rating),
                    format!("Rated \"{}\" {}", row.title, rating.stars()),
                )
            }
            KeyCode::Enter | KeyCode::Char(' ') if row.can_toggle() => {
                self.store.toggle_summary(&row.work_key);
                (true, String::new())
            }
            KeyCode::Char('d') | KeyCode::Delete => (
                self.store.remove(&row.key),
                format!("Removed \"{}\"", row.title),
            ),
            _ => return,
        };

        if changed {
            if !message.is_empty() {
                self.state.set_status(message);
            }
            self.refresh();
        }
    }

    /// Switches view; leaving Search drops its state and any pending result
    fn set_view(&mut self, view: View) {
        if self.state.view == View::Search && view != View::Search {
            self.search.reset();
            self.search_focus = SearchFocus::Input;
        }
        self.state.set_view(view);
    }

    fn dispatch(&self, request: SearchRequest) {
        let catalog = Arc::clone(self.store.catalog());
        let outcomes = self.outcomes_tx.clone();
        self.runtime.spawn(async move {
            let outcome = catalog.search(&request.query, request.page).await;
            // The receiver is gone only when the app has shut down
            let _ = outcomes.send((request.generation, outcome));
        });
    }

    fn refresh(&mut self) {
        self.snapshot = self.store.snapshot();
        self.collection = CollectionView::build(&self.snapshot, &self.catalog_config, self.filter);
        self.state
            .set_item_count(View::Library, self.collection.rows.len());
    }

    fn is_typing(&self) -> bool {
        self.state.view == View::Search && self.search_focus == SearchFocus::Input
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn search_focus(&self) -> SearchFocus {
        self.search_focus
    }

    pub fn collection(&self) -> &CollectionView {
        &self.collection
    }

    pub fn snapshot(&self) -> &LibrarySnapshot {
        &self.snapshot
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn store(&self) -> &LibraryStore {
        &self.store
    }
}
