//! Terminal UI configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Theme names understood by the terminal UI
pub const THEME_NAMES: [&str; 8] = [
    "dark",
    "light",
    "high-contrast",
    "solarized-dark",
    "solarized-light",
    "dracula",
    "nord",
    "monokai",
];

/// Terminal UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name
    pub theme: String,

    /// How long transient notices stay visible, in seconds
    pub notice_secs: u64,

    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            notice_secs: 3,
            tick_rate_ms: 250,
        }
    }
}

impl ConfigSection for UiConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let theme = self.theme.as_str();
        let results = vec![
            Validator::one_of(&theme, &THEME_NAMES, "ui.theme"),
            Validator::in_range(self.notice_secs, 1, 60, "ui.notice_secs"),
            Validator::in_range(self.tick_rate_ms, 50, 2000, "ui.tick_rate_ms"),
        ];

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.theme = other.theme;
        self.notice_secs = other.notice_secs;
        self.tick_rate_ms = other.tick_rate_ms;
    }

    fn section_name(&self) -> &'static str {
        "ui"
    }
}
