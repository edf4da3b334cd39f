//! Terminal event polling

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Key press event
    Key(KeyEvent),
    /// Tick event for updates
    Tick,
    /// Quit application
    Quit,
    /// Resize event
    Resize(u16, u16),
}

/// Polls crossterm for input, yielding a tick when the poll times out
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Polls for the next event
    ///
    /// Only Ctrl-C is turned into [`AppEvent::Quit`] here; plain letters are
    /// left to the views because the search box accepts text.
    pub fn next(&self) -> crate::error::TuiResult<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(classify(key)),
                CrosstermEvent::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

fn classify(key: KeyEvent) -> AppEvent {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        AppEvent::Quit
    } else {
        AppEvent::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(Duration::from_millis(100));
        assert_eq!(handler.tick_rate(), Duration::from_millis(100));
        assert_eq!(EventHandler::default().tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(key), AppEvent::Quit);
    }

    #[test]
    fn test_plain_letters_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(classify(key), AppEvent::Key(key));
    }
}
