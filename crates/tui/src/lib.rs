//! Terminal user interface for Shelfwise
//!
//! [`App`] owns the view state and talks to a [`shelfwise_library::LibraryStore`];
//! [`TuiApp`] puts the terminal into raw mode around it.

mod app;
pub mod collection;
mod error;
mod events;
pub mod search;
mod state;
mod theme;
pub mod ui;

pub use app::{App, SearchFocus};
pub use error::{TuiError, TuiResult};
pub use events::{AppEvent, EventHandler};
pub use state::{AppState, View};
pub use theme::{Theme, ThemeType};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Terminal session wrapping an [`App`]
///
/// The terminal is restored when the session ends, including on panic unwind.
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl TuiApp {
    pub fn new(app: App) -> TuiResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, app })
    }

    pub fn run(&mut self) -> TuiResult<()> {
        let result = self.app.run(&mut self.terminal);
        self.cleanup()?;
        result
    }

    fn cleanup(&mut self) -> TuiResult<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
